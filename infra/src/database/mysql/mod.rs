//! MySQL repository implementations

mod account_repository_impl;
mod token_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use token_repository_impl::MySqlRefreshTokenRepository;

use qz_core::errors::DomainError;

/// Map a sqlx error to a retryable infrastructure error with context
pub(crate) fn storage_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, context, "storage operation failed");
    DomainError::Infrastructure {
        message: format!("{}: {}", context, err),
    }
}
