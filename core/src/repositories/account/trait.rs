//! Account repository trait defining the interface for the credential store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// The credential store owns account records; the auth core reaches it only
/// through this contract. Implementations must keep username and email
/// globally unique and surface storage failures as
/// `DomainError::Infrastructure` so they are never mistaken for credential
/// errors.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account whose username or email equals the given identifier
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account matches the identifier
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Check whether an account with the given username exists
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Check whether an account with the given email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Persist an account (insert or update by id)
    ///
    /// # Returns
    /// * `Ok(Account)` - The saved account
    /// * `Err(DomainError)` - Save failed (e.g., uniqueness violation)
    async fn save(&self, account: Account) -> Result<Account, DomainError>;
}
