//! Type definitions shared across server modules
//!
//! - `response` - Error-response structure returned at service boundaries

pub mod response;

pub use response::ErrorResponse;
