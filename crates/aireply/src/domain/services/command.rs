//! Command Parser
//!
//! Decides whether an inbound message is addressed to the assistant.

use crate::domain::entities::{Message, MessageType};

/// Literal, case-sensitive prefix marking a command
pub const COMMAND_PREFIX: &str = "Ai ";

/// A recognized command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Text after the prefix, trimmed; never empty
    pub payload: String,
}

/// Result of parsing a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParse {
    Command(Command),
    NotACommand,
}

impl CommandParse {
    pub fn into_command(self) -> Option<Command> {
        match self {
            Self::Command(command) => Some(command),
            Self::NotACommand => None,
        }
    }
}

/// Parse a message into a command.
///
/// Only text messages starting with [`COMMAND_PREFIX`] qualify. A prefix
/// followed by nothing but whitespace is not a command.
pub fn parse_command(message: &Message) -> CommandParse {
    if message.message_type != MessageType::Text {
        return CommandParse::NotACommand;
    }

    let Some(rest) = message
        .text
        .as_deref()
        .and_then(|text| text.strip_prefix(COMMAND_PREFIX))
    else {
        return CommandParse::NotACommand;
    };

    let payload = rest.trim();
    if payload.is_empty() {
        return CommandParse::NotACommand;
    }

    CommandParse::Command(Command {
        payload: payload.to_string(),
    })
}
