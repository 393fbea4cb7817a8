//! Persisted ledger of issued refresh tokens with rotate-on-use.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::{RefreshTokenRecord, SessionMetadata};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::RefreshTokenRepository;

/// Ledger enforcing single-use rotation of refresh tokens
///
/// Tokens are stored as SHA-256 hashes; the raw token string never reaches
/// the backing store. Storage failures pass through untouched so callers can
/// tell a retryable outage from a rejected token.
pub struct RefreshTokenLedger<R: RefreshTokenRepository> {
    repository: Arc<R>,
    lifetime_ms: i64,
}

impl<R: RefreshTokenRepository> RefreshTokenLedger<R> {
    /// Creates a ledger issuing records that expire `lifetime_ms` from issuance
    pub fn new(repository: Arc<R>, lifetime_ms: i64) -> Self {
        Self {
            repository,
            lifetime_ms,
        }
    }

    /// Hashes a token string for storage and lookup
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Persists a new active record for a freshly issued token
    pub async fn issue(
        &self,
        account_id: Uuid,
        token: &str,
        metadata: SessionMetadata,
    ) -> DomainResult<RefreshTokenRecord> {
        let record = RefreshTokenRecord::new(
            account_id,
            Self::hash_token(token),
            self.lifetime_ms,
            metadata,
        );
        self.repository.save(record).await
    }

    /// Looks up a presented token and checks it is still usable
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidRefreshToken` - no record matches
    /// * `TokenError::TokenRevoked` - record already consumed or revoked
    /// * `TokenError::RefreshTokenExpired` - record past its expiry
    pub async fn validate(&self, token: &str) -> DomainResult<RefreshTokenRecord> {
        let record = self
            .repository
            .find_by_hash(&Self::hash_token(token))
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if record.revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }
        if record.is_expired() {
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        Ok(record)
    }

    /// Consumes a record as part of rotation
    ///
    /// Delegates to the repository's compare-and-set so that of any number
    /// of concurrent rotations of the same record, exactly one succeeds; the
    /// losers observe `TokenError::TokenRevoked`. Must be called before the
    /// replacement token is issued.
    pub async fn rotate(&self, record: &RefreshTokenRecord) -> DomainResult<()> {
        let consumed = self.repository.revoke_if_active(&record.token_hash).await?;
        if !consumed {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }
        Ok(())
    }

    /// Bulk-revokes every live record of an account (logout, suspension)
    pub async fn revoke_all_for(&self, account_id: Uuid) -> DomainResult<usize> {
        self.repository.revoke_all_for_account(account_id).await
    }

    /// Removes expired records from storage
    pub async fn delete_expired(&self) -> DomainResult<usize> {
        self.repository.delete_expired().await
    }
}
