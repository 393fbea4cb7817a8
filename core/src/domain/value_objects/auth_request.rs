//! Request value objects accepted by the auth orchestrator.

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username (3-50 characters, globally unique)
    pub username: String,

    /// Email address (globally unique)
    pub email: String,

    /// Plaintext password (at least 6 characters); hashed before storage
    pub password: String,

    /// First name for display
    pub first_name: String,

    /// Last name for display
    pub last_name: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Username or email identifying the account
    pub username_or_email: String,

    /// Plaintext password
    pub password: String,
}
