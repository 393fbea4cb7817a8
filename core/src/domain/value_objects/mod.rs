//! Value objects representing immutable domain concepts.

pub mod account_view;
pub mod auth_request;
pub mod auth_response;

// Re-export commonly used types
pub use account_view::AccountView;
pub use auth_request::{AuthRequest, RegisterRequest};
pub use auth_response::AuthResponse;
