//! # QuizForge Core
//!
//! Core business logic and domain layer for the QuizForge backend.
//! This crate contains the authentication and session-lifecycle subsystem:
//! domain entities, the credential/token services, repository interfaces,
//! and error types. Quiz CRUD, attempt scoring, and AI quiz generation are
//! external collaborators and talk to this crate through the `AuthService`
//! surface and the repository traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
