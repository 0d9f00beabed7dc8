//! Password hashing using argon2
//!
//! Provides salted one-way hashing and verification.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers use the `_async`
//! variants, which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::OnceLock;

/// Password hashing service
///
/// Uses Argon2id with a fresh random salt per hash. The output is a PHC
/// string that embeds the algorithm parameters and salt, so verification
/// needs nothing but the stored value.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: SecretString) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(password.expose_secret()))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// Returns `Ok(false)` on mismatch and `Err` only when the stored hash
    /// cannot be parsed.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: SecretString, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(password.expose_secret(), &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// A valid hash of an unguessable value (blocking operation)
    ///
    /// Built on first use and reused afterwards.
    pub fn dummy_hash() -> Result<&'static str> {
        static DUMMY: OnceLock<String> = OnceLock::new();
        if let Some(hash) = DUMMY.get() {
            return Ok(hash.as_str());
        }
        let mut seed = [0u8; 32];
        rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut seed);
        let seed: String = seed.iter().map(|b| format!("{:02x}", b)).collect();
        let hash = Self::hash(&seed)?;
        Ok(DUMMY.get_or_init(|| hash).as_str())
    }

    /// Verify a password against [`Self::dummy_hash`] (non-blocking)
    ///
    /// Login runs this when the username is unknown, so both failure paths
    /// cost one argon2 verification. Always `Ok(false)` unless hashing fails.
    pub async fn verify_dummy_async(password: SecretString) -> Result<bool> {
        tokio::task::spawn_blocking(move || {
            let hash = Self::dummy_hash()?;
            Self::verify(password.expose_secret(), hash)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
