//! Refresh token repository trait backing the refresh token ledger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for refresh token record persistence
///
/// Records are keyed by the SHA-256 hash of the token string; the raw token
/// never reaches storage. The revocation primitive is a compare-and-set so
/// the rotate-on-use guarantee holds at the storage layer even with several
/// service instances running against the same store.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token hash)
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a record by the hash of its token string
    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Atomically revoke the record iff it is not yet revoked
    ///
    /// This is the serialization point for rotation: of any number of
    /// concurrent callers presenting the same token, exactly one observes
    /// `true`. Implementations must use a conditional update (or an
    /// equivalent per-record serialization), never read-then-write.
    ///
    /// # Returns
    /// * `Ok(true)` - This call flipped the record to revoked
    /// * `Ok(false)` - The record was already revoked, or does not exist
    /// * `Err(DomainError)` - Storage error occurred
    async fn revoke_if_active(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Revoke every unrevoked record belonging to an account
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    async fn revoke_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError>;

    /// Delete records whose expiry has passed
    ///
    /// Garbage collection primitive; scheduling it is an external concern.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
