//! Domain Entities
//!
//! Transient models built per webhook request and dropped once the reply
//! has been attempted.
//! - WebhookEvent: inbound platform event
//! - ChatTurn: role-tagged completion input
//! - ReplyPayload: outbound reply addressed by a reply token

mod chat;
mod event;
mod reply;

pub use chat::*;
pub use event::*;
pub use reply::*;
