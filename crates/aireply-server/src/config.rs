//! Configuration for the aireply server
//!
//! Read once at startup from shuttle secrets (or any key lookup) into an
//! explicit `AppConfig` that is passed to every client constructor.

use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use aireply::DEFAULT_FALLBACK_TEXT;
use aireply_integration_line::LineConfig;

use crate::adapters::OpenAiConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub line: LineConfig,
    pub openai: OpenAiConfig,
    /// Apology sent when a command cannot be answered
    pub fallback_text: String,
}

impl AppConfig {
    /// Load from shuttle secrets
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self> {
        Self::from_lookup(|key| secrets.get(key))
    }

    /// Load from a key lookup function; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut line = LineConfig::new(required(&get, "LINE_CHANNEL_ACCESS_TOKEN")?);
        line.channel_secret = get("LINE_CHANNEL_SECRET");
        if let Some(url) = get("LINE_API_BASE_URL") {
            line.api_base_url = url;
        }
        if let Some(url) = get("LINE_DATA_BASE_URL") {
            line.data_base_url = url;
        }
        line.timeout_ms = parse_or(&get, "LINE_TIMEOUT", line.timeout_ms)?;

        let mut openai = OpenAiConfig::new(required(&get, "OPENAI_API_KEY")?);
        if let Some(url) = get("OPENAI_BASE_URL") {
            openai.base_url = url;
        }
        openai.timeout_ms = parse_or(&get, "OPENAI_TIMEOUT", openai.timeout_ms)?;

        let completion = &mut openai.completion;
        if let Some(model) = get("OPENAI_COMPLETION_MODEL") {
            completion.model = model;
        }
        if let Some(model) = get("OPENAI_VISION_MODEL") {
            completion.vision_model = model;
        }
        completion.temperature =
            parse_or(&get, "OPENAI_COMPLETION_TEMPERATURE", completion.temperature)?;
        completion.max_tokens = parse_or(&get, "OPENAI_COMPLETION_MAX_TOKENS", completion.max_tokens)?;
        completion.frequency_penalty = parse_or(
            &get,
            "OPENAI_COMPLETION_FREQUENCY_PENALTY",
            completion.frequency_penalty,
        )?;
        completion.presence_penalty = parse_or(
            &get,
            "OPENAI_COMPLETION_PRESENCE_PENALTY",
            completion.presence_penalty,
        )?;

        if let Some(model) = get("OPENAI_IMAGE_GENERATION_MODEL") {
            openai.image.model = model;
        }
        if let Some(size) = get("OPENAI_IMAGE_GENERATION_SIZE") {
            openai.image.size = size;
        }
        if let Some(quality) = get("OPENAI_IMAGE_GENERATION_QUALITY") {
            openai.image.quality = quality;
        }
        if let Some(model) = get("OPENAI_TRANSCRIPTION_MODEL") {
            openai.transcription_model = model;
        }

        Ok(Self {
            line,
            openai,
            fallback_text: get("FALLBACK_REPLY_TEXT")
                .unwrap_or_else(|| DEFAULT_FALLBACK_TEXT.to_string()),
        })
    }
}

fn required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    get(key).ok_or_else(|| anyhow!("Missing required secret {key}"))
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
