//! Database connection and pool management
//!
//! Credentials live in a single SQLite database. The pool is created once at
//! startup and shared through `AppState`.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Database configuration for pool creation
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub busy_timeout_secs: u64,
    /// `None` keeps idle connections open forever
    pub idle_timeout_secs: Option<u64>,
    pub max_lifetime_secs: Option<u64>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
            busy_timeout_secs: 5,
            idle_timeout_secs: Some(600),  // 10 minutes
            max_lifetime_secs: Some(1800), // 30 minutes
        }
    }
}

impl DbConfig {
    /// Private in-memory database
    ///
    /// Every SQLite connection to `:memory:` opens a fresh database, so the
    /// pool is pinned to exactly one connection that is never recycled.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_secs: None,
            max_lifetime_secs: None,
            ..Default::default()
        }
    }
}

/// Create a SQLite connection pool with production-ready settings
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let config = DbConfig {
        url: database_url.to_string(),
        max_connections,
        ..Default::default()
    };
    create_pool_with_config(&config).await
}

/// Create a SQLite connection pool with custom configuration
pub async fn create_pool_with_config(config: &DbConfig) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(config.idle_timeout_secs.map(Duration::from_secs))
        .max_lifetime(config.max_lifetime_secs.map(Duration::from_secs))
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(
        "Database pool created: max={}, min={}",
        config.max_connections, config.min_connections
    );

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
