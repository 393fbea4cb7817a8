//! Public view of an account, safe to return from the service boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};

/// Account projection without credential material
///
/// The conversion from `Account` drops the password hash by construction, so
/// no serializer configuration can accidentally leak it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Assigned role
    pub role: Role,

    /// Whether the account is enabled
    pub enabled: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last successful login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            role: account.role,
            enabled: account.enabled,
            created_at: account.created_at,
            last_login_at: account.last_login_at,
        }
    }
}
