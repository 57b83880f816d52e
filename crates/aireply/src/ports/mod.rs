//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the pipeline talks to the
//! completion backend and the messaging platform.
//!
//! Implementations of these traits live in the server and integration crates.

pub mod completion;
pub mod reply;

// Re-exports
pub use completion::*;
pub use reply::*;
