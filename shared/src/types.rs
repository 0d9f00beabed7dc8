//! Form request types

use crate::errors::ValidationError;
use crate::validation::{validate_password, validate_username};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Signup and login form body
///
/// Both pages post the same two fields. They are optional here so that a
/// missing field surfaces as a [`ValidationError`] instead of an extractor
/// rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialForm {
    #[serde(rename = "login-id")]
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl CredentialForm {
    /// Check presence and bounds of both fields
    pub fn validate(self) -> Result<Credentials, ValidationError> {
        let username = validate_username(self.username.as_deref().unwrap_or_default())?;
        let password = self.password.ok_or(ValidationError::Missing { field: "Password" })?;
        validate_password(password.expose_secret())?;

        Ok(Credentials {
            username: username.to_string(),
            password,
        })
    }

    /// The submitted username, for re-populating a rejected form
    pub fn username_hint(&self) -> &str {
        self.username.as_deref().map(str::trim).unwrap_or_default()
    }
}

/// A validated username/password pair
///
/// `Debug` never prints the password.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}
