//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction. It replaces any
//! process-global database handle: handlers only see what is passed in.

use crate::auth::SessionService;
use crate::config::AppConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
///
/// - `db`: SqlitePool is internally Arc'd, cloning is O(1)
/// - `config`: Wrapped in Arc, cloning is O(1)
/// - `sessions`: Pre-computed signing keys wrapped in Arc, cloning is O(1)
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session token signer with a per-process secret
    pub sessions: SessionService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Generates the session signing secret, so call this once at startup.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let sessions = SessionService::with_random_secret(&config.session);
        Self::with_sessions(db, config, sessions)
    }

    /// Create a state around an existing session service
    fn with_sessions(db: SqlitePool, config: AppConfig, sessions: SessionService) -> Self {
        Self {
            db,
            config: Arc::new(config),
            sessions,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Get a reference to the session service
    #[inline]
    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }
}
