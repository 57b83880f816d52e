//! Aireply Domain Library
//!
//! Core types and interfaces for answering `"Ai "`-prefixed chat messages
//! with an LLM completion.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: Webhook events, chat turns, reply payloads
//!   - `services/`: Command parsing
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `CompletionClient`: LLM completion backend
//!   - `ReplyClient`: Messaging platform reply endpoint
//!
//! - **Application** (`application/`): Use cases wiring ports together
//!   - `ResponseOrchestrator`: command → completion → exactly one reply
//!   - `EventDispatcher`: one task per webhook event
//!
//! # Usage
//!
//! ```rust,ignore
//! use aireply::{EventDispatcher, ResponseOrchestrator, CompletionOptions};
//!
//! let orchestrator = ResponseOrchestrator::new(completion, reply, CompletionOptions::default());
//! let dispatcher = EventDispatcher::new(Arc::new(orchestrator));
//! let summary = dispatcher.dispatch(events).await;
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{DispatchSummary, EventDispatcher, ReplyOutcome, ResponseOrchestrator};
pub use domain::{
    parse_command, ChatRole, ChatTurn, Command, CommandParse, ContentPart, DomainError,
    EventSource, EventType, ImageUrl, Message, MessageType, OutboundMessage, ReplyPayload,
    ReplyToken, SourceType, TurnContent, WebhookEvent, COMMAND_PREFIX, DEFAULT_FALLBACK_TEXT,
};
pub use ports::{
    CompletionClient, CompletionDefaults, CompletionOptions, CompletionRequest,
    CompletionResponse, ReplyClient, TokenUsage,
};
