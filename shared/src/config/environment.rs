//! Environment detection and required-variable validation

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get environment from the `ENVIRONMENT` variable
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .or_else(|_| env::var("ENV"))
            .unwrap_or_else(|_| String::from("development"))
            .parse()
            .unwrap_or(Environment::Development)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Errors produced while validating required environment variables
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvVarError {
    #[error("Required environment variable {name} is not set")]
    Missing { name: String },

    #[error("Environment variable {name} is not properly configured")]
    UnresolvedPlaceholder { name: String },
}

/// Check whether a configuration value still holds an unresolved `${...}`
/// substitution placeholder.
pub fn is_placeholder(value: &str) -> bool {
    value.starts_with("${") && value.ends_with('}')
}

/// Read a required environment variable, rejecting blank values and
/// unresolved `${...}` placeholders.
pub fn require_var(name: &str) -> Result<String, EnvVarError> {
    let value = env::var(name).unwrap_or_default();
    if value.trim().is_empty() {
        return Err(EnvVarError::Missing {
            name: name.to_string(),
        });
    }
    if is_placeholder(&value) {
        return Err(EnvVarError::UnresolvedPlaceholder {
            name: name.to_string(),
        });
    }
    Ok(value)
}

/// Validate that every named environment variable is present and resolved.
///
/// Intended to be called once at process start; any failure is fatal.
pub fn validate_required(names: &[&str]) -> Result<(), EnvVarError> {
    for name in names {
        require_var(name)?;
    }
    Ok(())
}
