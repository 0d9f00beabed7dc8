//! Credential store: signup, login verification and identity lookup
//!
//! # Performance Optimizations
//!
//! - Password hashing/verification runs on blocking thread pool
//! - Database queries use connection pooling

use crate::auth::PasswordService;
use crate::error::{AppError, AppResult};
use crate::repositories::{is_unique_violation, Credential, CredentialRepository};
use login_portal_shared::{AuthError, Credentials};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Credential service for authentication operations
pub struct CredentialService;

impl CredentialService {
    /// Create a credential, hashing the password before it is stored
    ///
    /// A taken username is reported as [`AuthError::DuplicateUsername`],
    /// whether it is caught by the up-front check or by the table's unique
    /// constraint when two signups race.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password: SecretString,
    ) -> AppResult<Credential> {
        if CredentialRepository::username_exists(pool, username)
            .await
            .map_err(AppError::Internal)?
        {
            debug!(username, "Signup rejected: username taken");
            return Err(AuthError::DuplicateUsername.into());
        }

        let password_hash = PasswordService::hash_async(password)
            .await
            .map_err(AppError::Internal)?;

        let credential = CredentialRepository::create(pool, username, &password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    debug!(username, "Signup lost a race for the username");
                    AppError::from(AuthError::DuplicateUsername)
                } else {
                    AppError::Internal(e)
                }
            })?;

        info!(user_id = credential.id, username, "Credential created");
        Ok(credential)
    }

    /// Find a credential by exact username
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> AppResult<Option<Credential>> {
        CredentialRepository::find_by_username(pool, username)
            .await
            .map_err(AppError::Internal)
    }

    /// Find a credential by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Credential>> {
        CredentialRepository::find_by_id(pool, id)
            .await
            .map_err(AppError::Internal)
    }

    /// Verify a username/password pair
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(
        pool: &SqlitePool,
        credentials: Credentials,
    ) -> AppResult<Credential> {
        let Credentials { username, password } = credentials;

        let Some(credential) = Self::find_by_username(pool, &username).await? else {
            // Burn the same CPU as a real check
            if let Err(e) = PasswordService::verify_dummy_async(password).await {
                warn!(error = %e, "Dummy password verification failed");
            }
            debug!(username = %username, "Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = PasswordService::verify_async(password, credential.password_hash.clone())
            .await
            .map_err(AppError::Internal)?;

        if !valid {
            debug!(user_id = credential.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(credential)
    }
}
