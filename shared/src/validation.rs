//! Input validation functions
//!
//! Usernames are stored in a bounded column, so both the presence and the
//! length of every field are checked before anything reaches the database.

use crate::errors::ValidationError;

/// Maximum username length, in characters
pub const USERNAME_MAX_LEN: usize = 50;

/// Maximum accepted password length, in characters
pub const PASSWORD_MAX_LEN: usize = 128;

/// Validate a username and return its trimmed form
pub fn validate_username(username: &str) -> Result<&str, ValidationError> {
    const FIELD: &str = "Username";

    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::Missing { field: FIELD });
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD,
            max: USERNAME_MAX_LEN,
        });
    }
    if username.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters { field: FIELD });
    }
    Ok(username)
}

/// Validate a plaintext password
///
/// Passwords are taken verbatim; surrounding whitespace is significant.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    const FIELD: &str = "Password";

    if password.is_empty() {
        return Err(ValidationError::Missing { field: FIELD });
    }
    if password.chars().count() > PASSWORD_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD,
            max: PASSWORD_MAX_LEN,
        });
    }
    Ok(())
}
