//! In-memory port implementations for application tests

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::entities::{ChatTurn, ReplyPayload, TurnContent};
use crate::domain::errors::DomainError;
use crate::ports::{
    CompletionClient, CompletionOptions, CompletionResponse, ReplyClient, TokenUsage,
};

pub(crate) enum Behavior {
    /// Reply with "echo: <payload>"
    Echo,
    Fixed(String),
    Fail,
    /// Fail when the payload contains the needle, echo otherwise
    FailOn(&'static str),
    /// Panic when the payload contains the needle, echo otherwise
    PanicOn(&'static str),
}

pub(crate) struct MockCompletion {
    behavior: Behavior,
    calls: Mutex<Vec<Vec<ChatTurn>>>,
}

impl MockCompletion {
    pub(crate) fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Vec<ChatTurn>> {
        self.calls.lock().unwrap().clone()
    }

    /// Text of the first turn of every call
    pub(crate) fn payloads(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|history| match &history.first()?.content {
                TurnContent::Text(text) => Some(text.clone()),
                TurnContent::Parts(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(
        &self,
        history: &[ChatTurn],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.calls.lock().unwrap().push(history.to_vec());

        let prompt = match history.first().map(|turn| &turn.content) {
            Some(TurnContent::Text(text)) => text.clone(),
            _ => String::new(),
        };

        let content = match &self.behavior {
            Behavior::Echo => format!("echo: {prompt}"),
            Behavior::Fixed(content) => content.clone(),
            Behavior::Fail => {
                return Err(DomainError::ExternalService("connection refused".into()))
            }
            Behavior::FailOn(needle) if prompt.contains(needle) => {
                return Err(DomainError::ExternalService("timed out".into()))
            }
            Behavior::PanicOn(needle) if prompt.contains(needle) => {
                panic!("completion blew up on {prompt}")
            }
            Behavior::FailOn(_) | Behavior::PanicOn(_) => format!("echo: {prompt}"),
        };

        Ok(CompletionResponse {
            content,
            model: "mock-model".to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

pub(crate) struct RecordingReply {
    fail: bool,
    attempts: Mutex<Vec<ReplyPayload>>,
}

impl RecordingReply {
    pub(crate) fn new(fail: bool) -> Self {
        Self {
            fail,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    /// Every attempted payload, delivered or not
    pub(crate) fn sent(&self) -> Vec<ReplyPayload> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyClient for RecordingReply {
    async fn reply(&self, payload: &ReplyPayload) -> Result<(), DomainError> {
        self.attempts.lock().unwrap().push(payload.clone());
        if self.fail {
            return Err(DomainError::ExternalService("Invalid reply token".into()));
        }
        Ok(())
    }

    fn platform_name(&self) -> &str {
        "recording"
    }
}
