//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, ConfigError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// Infrastructure failures are kept distinct from credential failures so a
/// storage timeout is never reported to a client as a bad credential: the
/// whole operation is safe to retry.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Infrastructure error: {message}")]
    Infrastructure { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DomainError {
    /// Whether retrying the whole operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Infrastructure { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
