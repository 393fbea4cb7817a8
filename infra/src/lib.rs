//! # Infrastructure Layer
//!
//! MySQL-backed implementations of the `qz_core` repository traits, plus
//! connection-pool setup. The auth core never touches SQL directly; this
//! crate is the only place the storage engine is visible.

pub mod database;

pub use database::mysql::{MySqlAccountRepository, MySqlRefreshTokenRepository};
pub use database::{create_pool, load_dotenv};
