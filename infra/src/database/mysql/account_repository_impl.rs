//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use qz_core::domain::entities::account::{Account, Role};
use qz_core::errors::DomainError;
use qz_core::repositories::AccountRepository;

use super::storage_error;

/// MySQL implementation of AccountRepository
///
/// Accounts are keyed by UUID stored as a 36-character string. Username and
/// email carry unique indexes; the `save` upsert relies on them to reject
/// duplicates at the database level.
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get role: {}", e) })?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            username: row.try_get("username").map_err(|e| DomainError::Internal {
                message: format!("Failed to get username: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get first_name: {}", e),
                })?,
            last_name: row.try_get("last_name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get last_name: {}", e),
            })?,
            role: parse_role(&role)?,
            enabled: row.try_get("enabled").map_err(|e| DomainError::Internal {
                message: format!("Failed to get enabled: {}", e),
            })?,
            locked: row.try_get("locked").map_err(|e| DomainError::Internal {
                message: format!("Failed to get locked: {}", e),
            })?,
            expired: row.try_get("expired").map_err(|e| DomainError::Internal {
                message: format!("Failed to get expired: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_login_at: {}", e),
                })?,
        })
    }
}

/// Column list shared by every SELECT against `accounts`
const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     role, enabled, locked, expired, created_at, updated_at, last_login_at";

fn role_to_str(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Admin => "admin",
        Role::Moderator => "moderator",
    }
}

fn parse_role(value: &str) -> Result<Role, DomainError> {
    match value {
        "user" => Ok(Role::User),
        "admin" => Ok(Role::Admin),
        "moderator" => Ok(Role::Moderator),
        other => Err(DomainError::Internal {
            message: format!("Unknown role value: {}", other),
        }),
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE username = ? OR email = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find account by identifier", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE id = ? LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find account by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = ?) as present";

        let row = sqlx::query(query)
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("check username existence", e))?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        Ok(present == 1)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) as present";

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("check email existence", e))?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        Ok(present == 1)
    }

    async fn save(&self, account: Account) -> Result<Account, DomainError> {
        // Update strictly by id so a colliding username or email can never
        // redirect the write onto another account's row
        let update = r#"
            UPDATE accounts SET
                password_hash = ?, first_name = ?, last_name = ?, role = ?,
                enabled = ?, locked = ?, expired = ?, updated_at = ?,
                last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(update)
            .bind(&account.password_hash)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(role_to_str(account.role))
            .bind(account.enabled)
            .bind(account.locked)
            .bind(account.expired)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("update account", e))?;

        if result.rows_affected() == 1 {
            return Ok(account);
        }

        let insert = r#"
            INSERT INTO accounts (
                id, username, email, password_hash, first_name, last_name,
                role, enabled, locked, expired, created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(insert)
            .bind(account.id.to_string())
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(role_to_str(account.role))
            .bind(account.enabled)
            .bind(account.locked)
            .bind(account.expired)
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // The unique indexes on username and email are the final
                // arbiter when two registrations race past the pre-checks
                if let sqlx::Error::Database(db) = &e {
                    if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                        return DomainError::Validation {
                            message: "username or email already exists".to_string(),
                        };
                    }
                }
                storage_error("insert account", e)
            })?;

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Admin, Role::Moderator] {
            assert_eq!(parse_role(role_to_str(role)).unwrap(), role);
        }
    }

    #[test]
    fn test_parse_role_rejects_unknown() {
        assert!(parse_role("superuser").is_err());
    }
}
