//! Database connection pool management

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;

use qz_core::errors::DomainError;
use qz_shared::config::DatabaseConfig;

pub mod mysql;

/// Load a `.env` file if one is present
///
/// Missing files are fine; deployments inject real environment variables.
pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("loaded environment from .env file");
    }
}

/// Create a MySQL connection pool from configuration
///
/// A pool that cannot be created is an infrastructure failure; the caller
/// decides whether startup continues.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DomainError> {
    tracing::info!(
        max_connections = config.max_connections,
        "creating database connection pool"
    );

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::Infrastructure {
            message: format!("failed to create database pool: {}", e),
        })
}
