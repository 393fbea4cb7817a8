//! Authentication and token signing configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// Token lifetimes are expressed in milliseconds to match the deployment
/// configuration surface; services convert to seconds where needed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// Access token expiry time in milliseconds
    pub access_token_expiry_ms: i64,

    /// Refresh token expiry time in milliseconds
    pub refresh_token_expiry_ms: i64,

    /// Allowed clock skew when validating expiry, in seconds
    #[serde(default)]
    pub leeway_secs: u64,

    /// Minimum accepted length of the signing secret
    #[serde(default = "default_min_secret_length")]
    pub min_secret_length: usize,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: String::from("quiz-app"),
            access_token_expiry_ms: 86_400_000,      // 24 hours
            refresh_token_expiry_ms: 604_800_000,    // 7 days
            leeway_secs: 0,
            min_secret_length: default_min_secret_length(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_ms = minutes * 60_000;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_ms = days * 86_400_000;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Reads `JWT_SECRET`, `JWT_ISSUER`, `JWT_EXPIRATION_MS` and
    /// `JWT_REFRESH_EXPIRATION_MS`, falling back to defaults for everything
    /// except the secret. Secret strength is validated by the token service
    /// at startup, not here.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or_default(),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            access_token_expiry_ms: std::env::var("JWT_EXPIRATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry_ms),
            refresh_token_expiry_ms: std::env::var("JWT_REFRESH_EXPIRATION_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry_ms),
            leeway_secs: defaults.leeway_secs,
            min_secret_length: defaults.min_secret_length,
        }
    }

    /// Access token lifetime in whole seconds, as reported to clients
    pub fn access_expiry_secs(&self) -> i64 {
        self.access_token_expiry_ms / 1000
    }
}

fn default_min_secret_length() -> usize {
    32
}
