//! Business services containing domain logic and use cases.

pub mod auth;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use password::PasswordVerifier;
pub use token::{RefreshTokenLedger, SecretManager, TokenService, TokenServiceConfig};
