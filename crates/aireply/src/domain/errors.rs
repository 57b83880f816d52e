//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl DomainError {
    /// Build an `ExternalService` error for a non-success HTTP status
    pub fn status<T: AsRef<str>>(service: T, status: u16, message: impl Into<String>) -> Self {
        Self::ExternalService(format!(
            "{} returned {}: {}",
            service.as_ref(),
            status,
            message.into()
        ))
    }
}
