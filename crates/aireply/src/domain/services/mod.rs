//! Domain Services

mod command;

pub use command::*;
