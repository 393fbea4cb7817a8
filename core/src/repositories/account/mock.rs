//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

use super::r#trait::AccountRepository;

/// In-memory account repository for tests, keyed by account id
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    /// When set, every call fails with an infrastructure error
    fail: Arc<RwLock<bool>>,
}

impl MockAccountRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
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
                message: "account store unreachable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, DomainError> {
        self.check_available().await?;
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.username == identifier || a.email == identifier)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.check_available().await?;
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.check_available().await?;
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_available().await?;
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        self.check_available().await?;
        let mut accounts = self.accounts.write().await;

        // Uniqueness checks mirror the unique indexes of the real store
        let conflict = accounts.values().any(|a| {
            a.id != account.id && (a.username == account.username || a.email == account.email)
        });
        if conflict {
            return Err(DomainError::Validation {
                message: "username or email already exists".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}
