//! aireply API Routes
//!
//! - /webhook - LINE webhook intake

pub mod swagger;
pub mod webhook;
