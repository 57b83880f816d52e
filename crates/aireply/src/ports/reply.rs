//! Reply Port
//!
//! Abstract interface for answering an inbound event on the messaging
//! platform it came from.

use async_trait::async_trait;

use crate::domain::entities::ReplyPayload;
use crate::domain::errors::DomainError;

/// Messaging platform reply interface
///
/// The payload carries a [`ReplyToken`](crate::ReplyToken), which cannot be
/// built from an empty string.
#[async_trait]
pub trait ReplyClient: Send + Sync {
    /// Send a reply
    async fn reply(&self, payload: &ReplyPayload) -> Result<(), DomainError>;

    /// Platform name (e.g., "line")
    fn platform_name(&self) -> &str;
}
