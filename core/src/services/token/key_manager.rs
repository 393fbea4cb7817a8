//! Signing-key validation and key material for token signing.

use jsonwebtoken::{DecodingKey, EncodingKey};

use qz_shared::config::environment::is_placeholder;
use qz_shared::config::JwtConfig;

use crate::errors::ConfigError;

/// Minimum accepted signing-secret length for an HMAC-class scheme
pub const MIN_SECRET_LENGTH: usize = 32;

/// Holds the HMAC signing key material for the process lifetime
///
/// Built exactly once at startup and injected into the token service;
/// construction is the boot-time gate on secret strength. Keys are derived
/// from the raw UTF-8 bytes of the secret. There is no rotation mechanism.
pub struct SecretManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SecretManager {
    /// Validate a secret and derive the signing keys
    ///
    /// # Errors
    ///
    /// * `ConfigError::MissingSecret` - secret is empty or blank
    /// * `ConfigError::UnresolvedPlaceholder` - secret still holds `${...}`
    /// * `ConfigError::SecretTooShort` - secret is shorter than `min_length`
    pub fn from_secret(secret: &str, min_length: usize) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if is_placeholder(secret) {
            return Err(ConfigError::UnresolvedPlaceholder);
        }
        if secret.len() < min_length {
            return Err(ConfigError::SecretTooShort {
                min: min_length,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Validate the secret carried by a `JwtConfig`
    pub fn from_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        Self::from_secret(&config.secret, config.min_secret_length)
    }

    /// Key used to sign tokens
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Key used to verify token signatures
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
