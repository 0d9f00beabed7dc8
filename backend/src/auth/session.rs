//! Session token issuing and validation
//!
//! A session is an HS256 JWT whose subject is the credential id, carried in
//! an HttpOnly cookie. The signing secret is generated once per process and
//! never leaves memory, so a restart logs everybody out.

use crate::config::SessionConfig;
use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Length of the generated signing secret, in bytes
pub const SECRET_LEN: usize = 32;

/// Anything that can be bound to a session
pub trait SessionIdentity {
    /// The stable identifier persisted in the session token
    fn session_identifier(&self) -> i64;
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (credential ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed signing keys, cheap to clone
#[derive(Clone)]
struct SessionKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl SessionKeys {
    fn new(secret: &Secret<[u8; SECRET_LEN]>) -> Self {
        let bytes = secret.expose_secret();
        Self {
            encoding: Arc::new(EncodingKey::from_secret(bytes)),
            decoding: Arc::new(DecodingKey::from_secret(bytes)),
        }
    }
}

/// Issues and validates session tokens and builds the session cookie
#[derive(Clone)]
pub struct SessionService {
    keys: SessionKeys,
    cookie_name: Arc<str>,
    expiry_secs: i64,
    secure_cookie: bool,
}

impl SessionService {
    /// Create a session service from an explicit secret
    pub fn new(secret: &Secret<[u8; SECRET_LEN]>, config: &SessionConfig) -> Self {
        Self {
            keys: SessionKeys::new(secret),
            cookie_name: Arc::from(config.cookie_name.as_str()),
            expiry_secs: config.expiry_secs,
            secure_cookie: config.secure_cookie,
        }
    }

    /// Create a session service signing with a fresh random secret
    pub fn with_random_secret(config: &SessionConfig) -> Self {
        let mut bytes = [0u8; SECRET_LEN];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self::new(&Secret::new(bytes), config)
    }

    /// Issue a session token for an identity
    pub fn issue<I: SessionIdentity>(&self, identity: &I) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiry_secs);

        let claims = SessionClaims {
            sub: identity.session_identifier().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue session token: {}", e))
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<SessionClaims> {
        let token_data = decode::<SessionClaims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid session token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Validate a token and return the identifier it is bound to
    pub fn resolve_identifier(&self, token: &str) -> Result<i64> {
        let claims = self.validate(token)?;
        claims
            .sub
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid subject in session token"))
    }

    /// Name of the session cookie
    #[inline]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Session lifetime in seconds
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    /// Cookie carrying a freshly issued token
    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.to_string(), token))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.expiry_secs))
            .build()
    }

    /// Cookie that, when removed from a jar, clears the session in the browser
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.to_string(), ""))
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .build()
    }
}
