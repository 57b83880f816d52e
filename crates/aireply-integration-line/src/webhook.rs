//! LINE webhook handling

use aireply::{DomainError, WebhookEvent};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, warn};

use crate::config::LineConfig;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the base64 HMAC-SHA256 of the raw body
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Compute the signature LINE sends for a body
pub fn sign_body(channel_secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(channel_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// LINE webhook handler for incoming events
pub struct LineWebhookHandler {
    /// Channel secret for signature verification (optional)
    channel_secret: Option<String>,
}

impl LineWebhookHandler {
    /// Create a webhook handler without signature verification
    pub fn new() -> Self {
        Self {
            channel_secret: None,
        }
    }

    /// Create a webhook handler with signature verification
    pub fn with_channel_secret(channel_secret: impl Into<String>) -> Self {
        Self {
            channel_secret: Some(channel_secret.into()),
        }
    }

    pub fn from_config(config: &LineConfig) -> Self {
        Self {
            channel_secret: config.channel_secret.clone(),
        }
    }

    /// Whether requests must carry a valid signature
    pub fn requires_signature(&self) -> bool {
        self.channel_secret.is_some()
    }

    /// Verify the `X-Line-Signature` header against the raw body
    pub fn verify_signature(&self, signature: &str, body: &[u8]) -> bool {
        let Some(ref secret) = self.channel_secret else {
            warn!("Signature verification requested but no channel secret configured");
            return false;
        };

        let Ok(expected) = STANDARD.decode(signature.trim()) else {
            debug!("Signature is not valid base64");
            return false;
        };

        let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
            warn!("Failed to create HMAC");
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }

    /// Parse a webhook body into events.
    ///
    /// The body must be a JSON object with an `events` array. Individual
    /// events that fail to parse are logged and dropped.
    pub fn parse_events(&self, body: &[u8]) -> Result<Vec<WebhookEvent>, DomainError> {
        let body: WebhookBody = serde_json::from_slice(body)
            .map_err(|e| DomainError::Validation(format!("Invalid webhook body: {}", e)))?;

        debug!(
            destination = ?body.destination,
            events = %body.events.len(),
            "Parsing LINE webhook"
        );

        let events = body
            .events
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value(raw) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(index = %index, error = %e, "Dropping malformed webhook event");
                    None
                }
            })
            .collect();

        Ok(events)
    }
}

impl Default for LineWebhookHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct WebhookBody {
    #[serde(default)]
    destination: Option<String>,
    events: Vec<serde_json::Value>,
}
