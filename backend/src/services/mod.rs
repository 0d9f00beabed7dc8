//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the password hasher.

pub mod credential;

pub use credential::CredentialService;
