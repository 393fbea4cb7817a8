//! Domain entities representing core business objects.

pub mod account;
pub mod token;

// Re-export commonly used types
pub use account::{Account, Credentials, Role};
pub use token::{Claims, RefreshTokenRecord, SessionMetadata, REFRESH_TOKEN_TYPE};
