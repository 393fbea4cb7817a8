//! Account entity representing a registered user of the quiz platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A standard platform user
    User,
    /// An administrator
    Admin,
    /// A content moderator
    Moderator,
}

impl Role {
    /// Authority string used by authorization middleware
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
            Role::Moderator => "ROLE_MODERATOR",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Capability contract the auth services rely on
///
/// Keeps credential verification decoupled from the full `Account` shape:
/// anything that can name itself, produce its stored credential hash, and
/// answer whether it may authenticate can go through the login flow.
pub trait Credentials {
    /// Unique login identifier (the username)
    fn identifier(&self) -> &str;

    /// Stored one-way credential hash
    fn credential_hash(&self) -> &str;

    /// Whether the holder is currently allowed to authenticate
    fn can_authenticate(&self) -> bool;
}

/// Account entity owned by the credential store
///
/// Read-mostly from the auth core's perspective: only creation during
/// registration and `last_login_at` updates mutate it. The password hash is
/// never serialized outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Globally unique username
    pub username: String,

    /// Globally unique email address
    pub email: String,

    /// Bcrypt hash of the password; never exposed in responses
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// First name for display
    pub first_name: String,

    /// Last name for display
    pub last_name: String,

    /// Assigned role
    pub role: Role,

    /// Whether the account is enabled
    pub enabled: bool,

    /// Whether the account has been locked by an administrator
    pub locked: bool,

    /// Whether the account has expired
    pub expired: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the last successful login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new enabled account with the default role
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            first_name,
            last_name,
            role: Role::default(),
            enabled: true,
            locked: false,
            expired: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Whether the account may currently authenticate
    pub fn is_active(&self) -> bool {
        self.enabled && !self.locked && !self.expired
    }

    /// Records a successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Locks the account
    pub fn lock(&mut self) {
        self.locked = true;
        self.updated_at = Utc::now();
    }

    /// Disables the account
    pub fn disable(&mut self) {
        self.enabled = false;
        self.updated_at = Utc::now();
    }
}

impl Credentials for Account {
    fn identifier(&self) -> &str {
        &self.username
    }

    fn credential_hash(&self) -> &str {
        &self.password_hash
    }

    fn can_authenticate(&self) -> bool {
        self.is_active()
    }
}
