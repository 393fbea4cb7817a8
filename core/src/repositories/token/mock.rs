//! Mock implementation of RefreshTokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::RefreshTokenRepository;

/// In-memory refresh token repository for tests
///
/// `revoke_if_active` holds the write lock across the read-and-flip, which
/// makes it linearizable per record just like the conditional UPDATE of the
/// MySQL implementation.
pub struct MockRefreshTokenRepository {
    records: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
    /// When set, every call fails with an infrastructure error
    fail: Arc<RwLock<bool>>,
}

impl MockRefreshTokenRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail: Arc::new(RwLock::new(false)),
        }
    }

    /// Simulate the backing store becoming unreachable
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.fail.write().await = unavailable;
    }

    async fn check_available(&self) -> Result<(), DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::Infrastructure {
                message: "token store unreachable".to_string(),
            });
        }
        Ok(())
    }

    /// Number of stored records, for test assertions
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockRefreshTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        self.check_available().await?;
        let mut records = self.records.write().await;

        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Validation {
                message: "token already exists".to_string(),
            });
        }

        records.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        self.check_available().await?;
        let records = self.records.read().await;
        Ok(records.get(token_hash).cloned())
    }

    async fn revoke_if_active(&self, token_hash: &str) -> Result<bool, DomainError> {
        self.check_available().await?;
        let mut records = self.records.write().await;

        match records.get_mut(token_hash) {
            Some(record) if !record.revoked => {
                record.revoke();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError> {
        self.check_available().await?;
        let mut records = self.records.write().await;
        let mut count = 0;

        for record in records.values_mut() {
            if record.account_id == account_id && !record.revoked {
                record.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        self.check_available().await?;
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| !record.is_expired());

        Ok(initial_count - records.len())
    }
}
