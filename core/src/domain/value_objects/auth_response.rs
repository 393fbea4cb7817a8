//! Authentication response value object returned after login and refresh.

use serde::{Deserialize, Serialize};

/// Authentication response containing the issued token pair
///
/// The three fields clients depend on (`access_token`, `refresh_token`,
/// `expires_in`) are always present together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Signed refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Token scheme, always `Bearer`
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates a bearer-token response
    pub fn bearer(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: String::from("Bearer"),
            expires_in,
        }
    }
}
