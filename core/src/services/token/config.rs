//! Configuration for the token service

use qz_shared::config::JwtConfig;

/// Configuration for token issuance and verification
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Issuer claim stamped into and required from every token
    pub issuer: String,
    /// Access token expiry in milliseconds
    pub access_token_expiry_ms: i64,
    /// Refresh token expiry in milliseconds
    pub refresh_token_expiry_ms: i64,
    /// Allowed clock skew when validating expiry, in seconds
    pub leeway_secs: u64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: String::from("quiz-app"),
            access_token_expiry_ms: 86_400_000,
            refresh_token_expiry_ms: 604_800_000,
            leeway_secs: 0,
        }
    }
}

impl TokenServiceConfig {
    /// Access token lifetime in whole seconds, as reported to clients
    pub fn access_expiry_secs(&self) -> i64 {
        self.access_token_expiry_ms / 1000
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            access_token_expiry_ms: config.access_token_expiry_ms,
            refresh_token_expiry_ms: config.refresh_token_expiry_ms,
            leeway_secs: config.leeway_secs,
        }
    }
}
