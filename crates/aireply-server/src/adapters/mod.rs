//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod openai;

// Re-exports
pub use openai::{ImageDefaults, OpenAiClient, OpenAiConfig};
