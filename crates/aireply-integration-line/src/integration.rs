//! ReplyClient implementation for LINE

use aireply::{DomainError, ReplyClient, ReplyPayload};
use async_trait::async_trait;

use crate::client::{GroupSummary, LineApiError, LineClient, UserProfile};
use crate::config::LineConfig;

/// LINE integration implementing the `ReplyClient` port
pub struct LineIntegration {
    client: LineClient,
}

impl LineIntegration {
    /// Create a new LINE integration
    pub fn new(config: LineConfig) -> Result<Self, DomainError> {
        let client = LineClient::new(config).map_err(into_domain)?;
        Ok(Self { client })
    }

    /// Display name of a user
    pub async fn profile(&self, user_id: &str) -> Result<UserProfile, DomainError> {
        self.client.fetch_profile(user_id).await.map_err(into_domain)
    }

    /// Name of a group
    pub async fn group_summary(&self, group_id: &str) -> Result<GroupSummary, DomainError> {
        self.client
            .fetch_group_summary(group_id)
            .await
            .map_err(into_domain)
    }

    /// Binary content of a media message
    pub async fn content(&self, message_id: &str) -> Result<Vec<u8>, DomainError> {
        self.client
            .fetch_content(message_id)
            .await
            .map_err(into_domain)
    }

    /// Get the underlying client for advanced operations
    pub fn client(&self) -> &LineClient {
        &self.client
    }
}

fn into_domain(e: LineApiError) -> DomainError {
    match e {
        LineApiError::Api { status, message } => DomainError::status("LINE API", status, message),
        LineApiError::Request(e) => DomainError::ExternalService(format!("LINE API error: {}", e)),
    }
}

#[async_trait]
impl ReplyClient for LineIntegration {
    async fn reply(&self, payload: &ReplyPayload) -> Result<(), DomainError> {
        self.client.reply(payload).await.map_err(into_domain)
    }

    fn platform_name(&self) -> &str {
        "line"
    }
}
