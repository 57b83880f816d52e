//! Application Layer
//!
//! Use cases that tie the command parser to the completion and reply ports.

mod dispatcher;
mod responder;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::*;
pub use responder::*;
