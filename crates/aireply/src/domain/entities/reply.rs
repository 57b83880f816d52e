//! Reply Entity
//!
//! Outbound reply addressed by a one-time reply token.

use serde::{Deserialize, Serialize};

/// Fixed apology sent when anything fails after a command was recognized
pub const DEFAULT_FALLBACK_TEXT: &str = "Sorry, I encountered an error processing your request.";

/// Single-use reply token; never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReplyToken(String);

impl ReplyToken {
    /// Returns `None` for missing or blank tokens
    pub fn parse(token: Option<&str>) -> Option<Self> {
        token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| Self(t.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReplyToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outbound message object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Text { text: String },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Reply request body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyPayload {
    pub reply_token: ReplyToken,
    pub messages: Vec<OutboundMessage>,
}

impl ReplyPayload {
    /// Reply with a single text message
    pub fn text(reply_token: ReplyToken, text: impl Into<String>) -> Self {
        Self {
            reply_token,
            messages: vec![OutboundMessage::text(text)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_token_rejects_blank() {
        assert!(ReplyToken::parse(None).is_none());
        assert!(ReplyToken::parse(Some("")).is_none());
        assert!(ReplyToken::parse(Some("   ")).is_none());
        assert_eq!(ReplyToken::parse(Some("abc")).unwrap().as_str(), "abc");
    }

    #[test]
    fn test_payload_wire_format() {
        let token = ReplyToken::parse(Some("token-1")).unwrap();
        let payload = ReplyPayload::text(token, "hello");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "replyToken": "token-1",
                "messages": [{ "type": "text", "text": "hello" }]
            })
        );
    }
}
