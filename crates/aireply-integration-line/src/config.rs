//! LINE configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.line.me";
pub const DEFAULT_DATA_BASE_URL: &str = "https://api-data.line.me";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration for LINE integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Channel access token sent as bearer auth
    pub channel_access_token: String,
    /// Channel secret for webhook signatures; verification is off when unset
    pub channel_secret: Option<String>,
    /// Base URL of the messaging API
    pub api_base_url: String,
    /// Base URL of the content API
    pub data_base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl LineConfig {
    /// Create a new LINE configuration with just an access token
    pub fn new(channel_access_token: impl Into<String>) -> Self {
        Self {
            channel_access_token: channel_access_token.into(),
            ..Self::default()
        }
    }

    /// Set the channel secret
    pub fn with_channel_secret(mut self, secret: impl Into<String>) -> Self {
        self.channel_secret = Some(secret.into());
        self
    }

    /// Point both APIs at other hosts
    pub fn with_base_urls(mut self, api: impl Into<String>, data: impl Into<String>) -> Self {
        self.api_base_url = api.into();
        self.data_base_url = data.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            channel_access_token: String::new(),
            channel_secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_base_url: DEFAULT_DATA_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}
