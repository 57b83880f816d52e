//! LINE Integration for aireply
//!
//! This crate provides LINE Messaging API integration: replying to events,
//! fetching profiles and message content, and parsing signed webhooks.
//!
//! # Usage
//!
//! ```rust,ignore
//! use aireply_integration_line::{LineConfig, LineIntegration, LineWebhookHandler};
//!
//! let config = LineConfig::new("channel-access-token").with_channel_secret("secret");
//! let integration = LineIntegration::new(config.clone())?;
//! let webhook = LineWebhookHandler::from_config(&config);
//! ```

mod client;
mod config;
mod integration;
mod webhook;

pub use client::{GroupSummary, LineApiError, LineClient, UserProfile};
pub use config::LineConfig;
pub use integration::LineIntegration;
pub use webhook::{sign_body, LineWebhookHandler, SIGNATURE_HEADER};
