//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value of the `token_type` claim carried by refresh tokens
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Claims structure for the JWT payload
///
/// Access tokens carry no `token_type` claim; refresh tokens carry
/// `token_type = "refresh"` so one can never stand in for the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the account's username)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer; defaulted on decode so a missing claim is reported by
    /// validation as an issuer failure rather than a parse failure
    #[serde(default)]
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Token type marker, present on refresh tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl Claims {
    /// Creates claims for an access token
    pub fn new_access_token(subject: &str, issuer: &str, lifetime_ms: i64) -> Self {
        Self::new(subject, issuer, lifetime_ms, None)
    }

    /// Creates claims for a refresh token
    pub fn new_refresh_token(subject: &str, issuer: &str, lifetime_ms: i64) -> Self {
        Self::new(
            subject,
            issuer,
            lifetime_ms,
            Some(REFRESH_TOKEN_TYPE.to_string()),
        )
    }

    fn new(subject: &str, issuer: &str, lifetime_ms: i64, token_type: Option<String>) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::milliseconds(lifetime_ms);

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        }
    }

    /// Whether this token is a refresh token
    pub fn is_refresh_token(&self) -> bool {
        self.token_type.as_deref() == Some(REFRESH_TOKEN_TYPE)
    }

    /// Checks the claims against the current wall clock
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Client metadata recorded alongside an issued refresh token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Origin IP address of the issuing request
    pub ip_address: Option<String>,

    /// Client label (user agent)
    pub user_agent: Option<String>,
}

/// Refresh token record persisted in the ledger
///
/// The record stores a SHA-256 hash of the signed token string, not the
/// token itself. It mutates exactly once in its lifetime, to flip `revoked`
/// when consumed by rotation or bulk revocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Account this token belongs to
    pub account_id: Uuid,

    /// SHA-256 hash of the token string
    pub token_hash: String,

    /// Timestamp when the token was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub revoked: bool,

    /// Origin IP address captured at issuance
    pub ip_address: Option<String>,

    /// Client label captured at issuance
    pub user_agent: Option<String>,
}

impl RefreshTokenRecord {
    /// Creates a new active record expiring `lifetime_ms` from now
    pub fn new(
        account_id: Uuid,
        token_hash: String,
        lifetime_ms: i64,
        metadata: SessionMetadata,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            token_hash,
            created_at: now,
            expires_at: now + Duration::milliseconds(lifetime_ms),
            revoked: false,
            ip_address: metadata.ip_address,
            user_agent: metadata.user_agent,
        }
    }

    /// Checks whether the record has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// A record is active while it is neither revoked nor expired
    pub fn is_active(&self) -> bool {
        !self.revoked && !self.is_expired()
    }

    /// Marks the record as revoked (terminal)
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEK_MS: i64 = 604_800_000;

    #[test]
    fn test_access_token_claims() {
        let claims = Claims::new_access_token("alice", "quiz-app", 900_000);

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, "quiz-app");
        assert_eq!(claims.token_type, None);
        assert!(!claims.is_refresh_token());
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_claims() {
        let claims = Claims::new_refresh_token("alice", "quiz-app", WEEK_MS);

        assert_eq!(claims.token_type, Some("refresh".to_string()));
        assert!(claims.is_refresh_token());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new_access_token("alice", "quiz-app", 900_000);
        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
    }

    #[test]
    fn test_access_token_serializes_without_type_claim() {
        let claims = Claims::new_access_token("alice", "quiz-app", 900_000);
        let json = serde_json::to_string(&claims).unwrap();

        assert!(!json.contains("token_type"));

        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn test_record_creation() {
        let account_id = Uuid::new_v4();
        let record = RefreshTokenRecord::new(
            account_id,
            "hash".to_string(),
            WEEK_MS,
            SessionMetadata::default(),
        );

        assert_eq!(record.account_id, account_id);
        assert!(!record.revoked);
        assert!(!record.is_expired());
        assert!(record.is_active());
        assert!(record.ip_address.is_none());
    }

    #[test]
    fn test_record_metadata() {
        let record = RefreshTokenRecord::new(
            Uuid::new_v4(),
            "hash".to_string(),
            WEEK_MS,
            SessionMetadata {
                ip_address: Some("203.0.113.9".to_string()),
                user_agent: Some("quiz-cli/1.0".to_string()),
            },
        );

        assert_eq!(record.ip_address.as_deref(), Some("203.0.113.9"));
        assert_eq!(record.user_agent.as_deref(), Some("quiz-cli/1.0"));
    }

    #[test]
    fn test_record_revocation_is_terminal() {
        let mut record = RefreshTokenRecord::new(
            Uuid::new_v4(),
            "hash".to_string(),
            WEEK_MS,
            SessionMetadata::default(),
        );

        assert!(record.is_active());
        record.revoke();
        assert!(record.revoked);
        assert!(!record.is_active());
    }

    #[test]
    fn test_record_expiration() {
        let mut record = RefreshTokenRecord::new(
            Uuid::new_v4(),
            "hash".to_string(),
            WEEK_MS,
            SessionMetadata::default(),
        );
        record.expires_at = Utc::now() - Duration::days(1);

        assert!(record.is_expired());
        assert!(!record.is_active());
    }
}
