//! MySQL implementation of the RefreshTokenRepository trait.
//!
//! Records carry only the SHA-256 hash of the token string. Revocation during
//! rotation is a conditional UPDATE so the single-winner guarantee holds even
//! with several service instances sharing the same database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use qz_core::domain::entities::token::RefreshTokenRecord;
use qz_core::errors::DomainError;
use qz_core::repositories::RefreshTokenRepository;

use super::storage_error;

/// MySQL implementation of RefreshTokenRepository
pub struct MySqlRefreshTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshTokenRepository {
    /// Create a new MySQL refresh token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let account_id: String = row.try_get("account_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get account_id: {}", e),
        })?;

        Ok(RefreshTokenRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            account_id: Uuid::parse_str(&account_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid account UUID: {}", e),
            })?,
            token_hash: row.try_get("token_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_hash: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            revoked: row.try_get("is_revoked").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_revoked: {}", e),
            })?,
            ip_address: row
                .try_get::<Option<String>, _>("ip_address")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get ip_address: {}", e),
                })?,
            user_agent: row
                .try_get::<Option<String>, _>("user_agent")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get user_agent: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl RefreshTokenRepository for MySqlRefreshTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        // token_hash carries a unique index; a duplicate surfaces here
        let query = r#"
            INSERT INTO refresh_tokens (
                id, account_id, token_hash, created_at, expires_at, is_revoked,
                ip_address, user_agent
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.account_id.to_string())
            .bind(&record.token_hash)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.revoked)
            .bind(&record.ip_address)
            .bind(&record.user_agent)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("save refresh token", e))?;

        Ok(record)
    }

    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, account_id, token_hash, created_at, expires_at, is_revoked,
                   ip_address, user_agent
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke_if_active(&self, token_hash: &str) -> Result<bool, DomainError> {
        // The WHERE clause is the compare-and-set: of any number of
        // concurrent callers, exactly one sees rows_affected == 1.
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token_hash = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("revoke refresh token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn revoke_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE account_id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("revoke account tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let query = "DELETE FROM refresh_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete expired tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
