//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod credential;

pub use credential::{is_unique_violation, Credential, CredentialRepository};
