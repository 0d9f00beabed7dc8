//! Login Portal Shared Library
//!
//! Form types, input validation and domain error types used by the
//! backend handlers and their tests.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
