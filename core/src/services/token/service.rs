//! JWT signer/verifier implementation

use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;
use super::key_manager::SecretManager;

/// Service for issuing and verifying signed tokens
///
/// Verification always checks signature, expiry and issuer before the
/// subject claim is trusted. Issuer pinning is unconditional: tokens without
/// an issuer claim, or with a foreign one, are rejected.
pub struct TokenService {
    keys: SecretManager,
    config: TokenServiceConfig,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from validated key material
    pub fn new(keys: SecretManager, config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        // set_issuer alone only compares a present claim; the claim itself
        // must be required or an iss-less token would slip through
        validation.required_spec_claims.insert("iss".to_owned());
        validation.validate_exp = true;
        // Zero unless the deployment opts into skew tolerance
        validation.leeway = config.leeway_secs;

        Self {
            keys,
            config,
            validation,
        }
    }

    /// Issues a short-lived access token for the given subject
    pub fn issue_access_token(&self, subject: &str) -> DomainResult<String> {
        let claims = Claims::new_access_token(
            subject,
            &self.config.issuer,
            self.config.access_token_expiry_ms,
        );
        self.encode_jwt(&claims)
    }

    /// Issues a long-lived refresh token carrying `token_type = "refresh"`
    pub fn issue_refresh_token(&self, subject: &str) -> DomainResult<String> {
        let claims = Claims::new_refresh_token(
            subject,
            &self.config.issuer,
            self.config.refresh_token_expiry_ms,
        );
        self.encode_jwt(&claims)
    }

    fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, self.keys.encoding_key())
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a token and returns its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenExpired` - expiry is in the past (wall clock at
    ///   verification time, minus configured leeway)
    /// * `TokenError::IssuerMismatch` - issuer claim absent or foreign
    /// * `TokenError::InvalidSignature` - signature does not match
    /// * `TokenError::InvalidToken` - malformed or otherwise untrusted
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                let kind = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidIssuer => TokenError::IssuerMismatch,
                    ErrorKind::MissingRequiredClaim(claim) if claim == "iss" => {
                        TokenError::IssuerMismatch
                    }
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::InvalidToken,
                };
                DomainError::Token(kind)
            })?;

        Ok(token_data.claims)
    }

    /// True iff the token verifies and its subject matches `expected_subject`
    pub fn is_valid_for(&self, token: &str, expected_subject: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => claims.sub == expected_subject,
            Err(_) => false,
        }
    }

    /// Service configuration (issuer, lifetimes)
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }
}
