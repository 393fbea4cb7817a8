//! Authentication orchestrator module
//!
//! Composes the credential store, password verifier, token signer and
//! refresh token ledger into the register / login / refresh operations.
//! This is the only surface other subsystems call.

mod service;


pub use service::AuthService;
