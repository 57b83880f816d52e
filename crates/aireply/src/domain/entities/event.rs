//! Webhook Event Entity
//!
//! Inbound events as delivered by the messaging platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of webhook event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Message,
    Postback,
    /// Follow, join, unsend, and anything added later
    #[serde(other)]
    Other,
}

/// Kind of conversation an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    User,
    Group,
    Room,
    #[serde(other)]
    Other,
}

/// Conversation an event came from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl EventSource {
    /// Identifier of the conversation (group, room, or user)
    pub fn conversation_id(&self) -> Option<&str> {
        match self.source_type {
            SourceType::Group => self.group_id.as_deref(),
            SourceType::Room => self.room_id.as_deref(),
            _ => self.user_id.as_deref(),
        }
    }
}

/// Kind of inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Sticker,
    Audio,
    Image,
    Template,
    #[serde(other)]
    Other,
}

/// Message carried by a `message` event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Platform message ID (used to fetch binary content)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Present when `message_type` is `Text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Message {
    /// Create a text message
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            message_type: MessageType::Text,
            text: Some(text.into()),
        }
    }

    /// Create a message of a non-text type
    pub fn of_type(message_type: MessageType) -> Self {
        Self {
            id: None,
            message_type,
            text: None,
        }
    }
}

/// A single webhook event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EventSource>,
    /// Single-use token required to answer this event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl WebhookEvent {
    /// Create a `message` event
    pub fn message(message: Message, reply_token: impl Into<String>) -> Self {
        Self {
            event_type: EventType::Message,
            source: None,
            reply_token: Some(reply_token.into()),
            message: Some(message),
            timestamp: None,
        }
    }

    /// Set the source
    pub fn with_source(mut self, source: EventSource) -> Self {
        self.source = Some(source);
        self
    }

    /// When the platform received the event
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}
