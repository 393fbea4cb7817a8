//! Token services for JWT signing and the refresh token ledger
//!
//! This module handles all token-related operations:
//! - Signing-key validation at startup (hard boot-time gate)
//! - Access and refresh token issuance and verification
//! - The persisted refresh token ledger with rotate-on-use

mod config;
mod key_manager;
mod ledger;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use key_manager::SecretManager;
pub use ledger::RefreshTokenLedger;
pub use service::TokenService;
