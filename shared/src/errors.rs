//! Error types for the Login Portal application

use thiserror::Error;

/// A submitted form field failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} contains invalid characters")]
    InvalidCharacters { field: &'static str },

    /// The submission could not be decoded as a form at all
    #[error("The submitted form could not be read")]
    Unreadable,
}

impl ValidationError {
    /// Name of the offending form field, if a single field is at fault
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field }
            | Self::TooLong { field, .. }
            | Self::InvalidCharacters { field } => Some(field),
            Self::Unreadable => None,
        }
    }
}

/// Authentication error types
///
/// `InvalidCredentials` carries no detail: an unknown username and a wrong
/// password produce the same message. An invalid session is not an error at
/// all; it resolves to an anonymous request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("That username is already taken")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,
}
