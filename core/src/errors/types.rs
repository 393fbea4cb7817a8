//! Error type definitions for authentication, token management and
//! configuration validation, plus their boundary `ErrorResponse` conversions.

use qz_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Fatal configuration errors detected at process start
///
/// A process with a weak or missing signing secret must not start; none of
/// these are recoverable at runtime.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Signing secret is not set")]
    MissingSecret,

    #[error("Signing secret still holds an unresolved placeholder")]
    UnresolvedPlaceholder,

    #[error("Signing secret is too short: {actual} characters, minimum {min}")]
    SecretTooShort { min: usize, actual: usize },
}

/// Authentication-related errors
///
/// `InvalidCredentials` deliberately covers both an unknown identifier and a
/// wrong password so the API cannot be used for account enumeration.
/// `InvalidRefreshToken` likewise collapses not-found, revoked and expired;
/// internal logs distinguish them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Account is locked")]
    AccountLocked,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token issuer mismatch")]
    IssuerMismatch,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Wrong token type for this operation")]
    WrongTokenType,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::DuplicateUsername => "DUPLICATE_USERNAME",
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            AuthError::AccountDisabled => "ACCOUNT_DISABLED",
            AuthError::AccountLocked => "ACCOUNT_LOCKED",
        }
    }
}

impl TokenError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::IssuerMismatch => "ISSUER_MISMATCH",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::WrongTokenType => "WRONG_TOKEN_TYPE",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}

impl From<&super::DomainError> for ErrorResponse {
    fn from(err: &super::DomainError) -> Self {
        use super::DomainError;
        match err {
            DomainError::Validation { message } => {
                ErrorResponse::new("VALIDATION_ERROR", message)
            }
            // Storage failures stay generic outward; full context is logged
            DomainError::Infrastructure { .. } => {
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
            }
            DomainError::Auth(e) => ErrorResponse::new(e.code(), e.to_string()),
            DomainError::Token(e) => ErrorResponse::new(e.code(), e.to_string()),
            DomainError::Config(e) => ErrorResponse::new("CONFIGURATION_ERROR", e.to_string()),
        }
    }
}
