//! OpenAI Completion Client
//!
//! Chat completion, image generation, and audio transcription over the
//! OpenAI HTTP API using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use aireply::{
    ChatTurn, CompletionClient, CompletionDefaults, CompletionOptions, CompletionResponse,
    DomainError, TokenUsage,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

pub const MODEL_DALL_E_3: &str = "dall-e-3";
pub const MODEL_WHISPER_1: &str = "whisper-1";

pub const IMAGE_SIZE_256: &str = "256x256";
pub const IMAGE_SIZE_512: &str = "512x512";
pub const IMAGE_SIZE_1024: &str = "1024x1024";

/// Image generation defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDefaults {
    pub model: String,
    pub size: String,
    pub quality: String,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            model: MODEL_DALL_E_3.to_string(),
            size: IMAGE_SIZE_1024.to_string(),
            quality: "standard".to_string(),
        }
    }
}

/// OpenAI connection and model settings
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub completion: CompletionDefaults,
    pub image: ImageDefaults,
    pub transcription_model: String,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            completion: CompletionDefaults::default(),
            image: ImageDefaults::default(),
            transcription_model: MODEL_WHISPER_1.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// dall-e-3 does not accept the small sizes; they are raised to 1024x1024
pub fn effective_image_size<'a>(model: &str, size: &'a str) -> &'a str {
    if model == MODEL_DALL_E_3 && matches!(size, IMAGE_SIZE_256 | IMAGE_SIZE_512) {
        IMAGE_SIZE_1024
    } else {
        size
    }
}

/// OpenAI implementation of CompletionClient
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DomainError::ExternalService(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Generate an image with the configured defaults, returning its URLs
    pub async fn create_image(&self, prompt: &str) -> Result<Vec<String>, DomainError> {
        let image = &self.config.image;
        let request = ImageRequest {
            model: &image.model,
            prompt,
            size: effective_image_size(&image.model, &image.size),
            quality: &image.quality,
            n: 1,
        };
        debug!(model = %request.model, size = %request.size, "Requesting image generation");

        let response = self
            .client
            .post(self.url("/v1/images/generations"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let body: ImageResponse = check(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        Ok(body.data.into_iter().filter_map(|d| d.url).collect())
    }

    /// Transcribe an audio file
    pub async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, DomainError> {
        debug!(
            model = %self.config.transcription_model,
            bytes = %audio.len(),
            "Requesting audio transcription"
        );

        let form = Form::new()
            .part("file", Part::bytes(audio).file_name(file_name.to_string()))
            .text("model", self.config.transcription_model.clone());

        let response = self
            .client
            .post(self.url("/v1/audio/transcriptions"))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(request_error)?;

        let body: TranscriptionResponse = check(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        Ok(body.text)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        history: &[ChatTurn],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let request = self.config.completion.resolve(history, options);
        debug!(
            model = %request.model,
            turns = %request.messages.len(),
            "Requesting chat completion"
        );

        let response = self
            .client
            .post(self.url("/v1/chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let body: ChatCompletionResponse = check(response)
            .await?
            .json()
            .await
            .map_err(decode_error)?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            DomainError::UnexpectedResponse("Chat completion returned no choices".to_string())
        })?;

        let usage = body
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: body.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}

fn request_error(e: reqwest::Error) -> DomainError {
    if e.is_timeout() {
        DomainError::ExternalService(format!("OpenAI request timed out: {e}"))
    } else {
        DomainError::ExternalService(format!("OpenAI request failed: {e}"))
    }
}

fn decode_error(e: reqwest::Error) -> DomainError {
    DomainError::UnexpectedResponse(format!("Invalid OpenAI response: {e}"))
}

/// Map non-2xx responses to an error, preferring `error.message` from the body
async fn check(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or(body);

    Err(DomainError::status("OpenAI", status.as_u16(), message))
}
