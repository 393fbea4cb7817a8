//! Shared utilities and common types for the QuizForge server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Environment detection and validation

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{DatabaseConfig, Environment, JwtConfig};
pub use types::response::ErrorResponse;
