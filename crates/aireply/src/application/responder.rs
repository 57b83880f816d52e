//! Response Orchestrator
//!
//! Turns a recognized command into exactly one reply: the completion on
//! success, the fallback text on any failure.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::entities::{ChatTurn, Message, ReplyPayload, ReplyToken, DEFAULT_FALLBACK_TEXT};
use crate::domain::errors::DomainError;
use crate::domain::services::{parse_command, Command};
use crate::ports::{CompletionClient, CompletionOptions, ReplyClient};

/// What happened to one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Not a command, or no usable reply token; nothing was sent
    Ignored,
    /// The completion was delivered
    Replied,
    /// The completion failed and the fallback text was delivered
    FallbackSent,
    /// Sending the reply failed; not retried
    DeliveryFailed,
}

/// Application service answering commands
pub struct ResponseOrchestrator<C: CompletionClient, R: ReplyClient> {
    completion: Arc<C>,
    reply: Arc<R>,
    options: CompletionOptions,
    fallback_text: String,
}

impl<C: CompletionClient, R: ReplyClient> ResponseOrchestrator<C, R> {
    pub fn new(completion: Arc<C>, reply: Arc<R>, options: CompletionOptions) -> Self {
        Self {
            completion,
            reply,
            options,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
        }
    }

    /// Override the apology sent on failure
    pub fn with_fallback_text(mut self, text: impl Into<String>) -> Self {
        self.fallback_text = text.into();
        self
    }

    pub fn fallback_text(&self) -> &str {
        &self.fallback_text
    }

    /// Handle one inbound message.
    ///
    /// Never fails: downstream errors end up in the returned outcome and the logs.
    pub async fn handle_message(&self, message: &Message, reply_token: Option<&str>) -> ReplyOutcome {
        let Some(command) = parse_command(message).into_command() else {
            debug!(message_type = ?message.message_type, "Ignoring message without command prefix");
            return ReplyOutcome::Ignored;
        };

        let Some(reply_token) = ReplyToken::parse(reply_token) else {
            warn!(payload_len = %command.payload.len(), "Command without reply token, skipping");
            return ReplyOutcome::Ignored;
        };

        self.respond(command, reply_token).await
    }

    /// Run a recognized command and send exactly one reply
    pub async fn respond(&self, command: Command, reply_token: ReplyToken) -> ReplyOutcome {
        let history = vec![ChatTurn::user(command.payload)];

        let (payload, outcome) = match self.generate(&history).await {
            Ok(content) => (
                ReplyPayload::text(reply_token, content),
                ReplyOutcome::Replied,
            ),
            Err(e) => {
                warn!(
                    error = %e,
                    provider = %self.completion.provider_name(),
                    "Completion failed, sending fallback reply"
                );
                (
                    ReplyPayload::text(reply_token, self.fallback_text.clone()),
                    ReplyOutcome::FallbackSent,
                )
            }
        };

        match self.reply.reply(&payload).await {
            Ok(()) => {
                debug!(
                    reply_token = %payload.reply_token,
                    outcome = ?outcome,
                    platform = %self.reply.platform_name(),
                    "Reply sent"
                );
                outcome
            }
            Err(e) => {
                error!(
                    error = %e,
                    reply_token = %payload.reply_token,
                    platform = %self.reply.platform_name(),
                    "Failed to send reply"
                );
                ReplyOutcome::DeliveryFailed
            }
        }
    }

    async fn generate(&self, history: &[ChatTurn]) -> Result<String, DomainError> {
        let response = self.completion.complete(history, &self.options).await?;
        if response.content.trim().is_empty() {
            return Err(DomainError::UnexpectedResponse(format!(
                "{} returned empty content",
                response.model
            )));
        }
        Ok(response.content)
    }
}
