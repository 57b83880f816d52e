//! Completion Port
//!
//! Abstract interface for chat completion backends, plus the model routing
//! every backend applies before dispatch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::ChatTurn;
use crate::domain::errors::DomainError;

/// Per-call overrides; `None` falls back to [`CompletionDefaults`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

/// Configured completion defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionDefaults {
    /// Model for text-only histories
    pub model: String,
    /// Model substituted whenever a turn references an image
    pub vision_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for CompletionDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            vision_model: "gpt-4o".to_string(),
            temperature: 0.9,
            max_tokens: 500,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

impl CompletionDefaults {
    /// Pick the model for a history.
    ///
    /// Image content always routes to `vision_model`, whatever was requested.
    pub fn select_model(&self, history: &[ChatTurn], requested: Option<&str>) -> String {
        if history.iter().any(ChatTurn::has_image) {
            return self.vision_model.clone();
        }
        requested.unwrap_or(&self.model).to_string()
    }

    /// Build the request body for a history
    pub fn resolve(&self, history: &[ChatTurn], options: &CompletionOptions) -> CompletionRequest {
        CompletionRequest {
            model: self.select_model(history, options.model.as_deref()),
            messages: history.to_vec(),
            temperature: options.temperature.unwrap_or(self.temperature),
            max_tokens: options.max_tokens.unwrap_or(self.max_tokens),
            frequency_penalty: options.frequency_penalty.unwrap_or(self.frequency_penalty),
            presence_penalty: options.presence_penalty.unwrap_or(self.presence_penalty),
        }
    }
}

/// Fully resolved chat completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

/// Response from a completion backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: TokenUsage,
    /// Finish reason ("stop", "length", ...)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Completion backend interface
///
/// # Example
///
/// ```rust,ignore
/// use aireply::ports::CompletionClient;
///
/// struct OpenAiClient { /* ... */ }
///
/// #[async_trait]
/// impl CompletionClient for OpenAiClient {
///     async fn complete(&self, history: &[ChatTurn], options: &CompletionOptions)
///         -> Result<CompletionResponse, DomainError> {
///         let request = self.defaults.resolve(history, options);
///         // POST /v1/chat/completions
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate a completion for a history
    async fn complete(
        &self,
        history: &[ChatTurn],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError>;

    /// Provider name (e.g., "openai")
    fn provider_name(&self) -> &str;
}
