//! LINE Messaging API client

use aireply::ReplyPayload;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::LineConfig;

/// Errors from the LINE HTTP API
#[derive(Debug, Error)]
pub enum LineApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LINE API returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// A user's public profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Group name and icon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub group_id: String,
    pub group_name: String,
    #[serde(default)]
    pub picture_url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// LINE API client
pub struct LineClient {
    http: Client,
    config: LineConfig,
}

impl LineClient {
    /// Create a new LINE client
    pub fn new(config: LineConfig) -> Result<Self, LineApiError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, config })
    }

    /// Answer an event using its reply token
    pub async fn reply(&self, payload: &ReplyPayload) -> Result<(), LineApiError> {
        let url = format!("{}/v2/bot/message/reply", self.config.api_base_url);
        debug!(
            reply_token = %payload.reply_token,
            messages = %payload.messages.len(),
            "Sending LINE reply"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.channel_access_token)
            .json(payload)
            .send()
            .await?;

        check(response)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to send LINE reply"))?;
        Ok(())
    }

    /// Get a user's profile
    pub async fn fetch_profile(&self, user_id: &str) -> Result<UserProfile, LineApiError> {
        let url = format!("{}/v2/bot/profile/{}", self.config.api_base_url, user_id);
        debug!(user_id = %user_id, "Fetching LINE profile");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.channel_access_token)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// Get a group's summary
    pub async fn fetch_group_summary(&self, group_id: &str) -> Result<GroupSummary, LineApiError> {
        let url = format!(
            "{}/v2/bot/group/{}/summary",
            self.config.api_base_url, group_id
        );
        debug!(group_id = %group_id, "Fetching LINE group summary");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.channel_access_token)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// Download the binary content of an image, audio, or video message
    pub async fn fetch_content(&self, message_id: &str) -> Result<Vec<u8>, LineApiError> {
        let url = format!(
            "{}/v2/bot/message/{}/content",
            self.config.data_base_url, message_id
        );
        debug!(message_id = %message_id, "Fetching LINE message content");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.channel_access_token)
            .send()
            .await?;

        let bytes = check(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }
}

/// Turn a non-2xx response into `LineApiError::Api`, preferring the body's `message`
async fn check(response: Response) -> Result<Response, LineApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or(body);

    Err(LineApiError::Api {
        status: status.as_u16(),
        message,
    })
}
