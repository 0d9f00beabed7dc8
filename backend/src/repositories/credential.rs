//! Credential repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Credential record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credential repository for database operations
pub struct CredentialRepository;

impl CredentialRepository {
    /// Insert a new credential
    ///
    /// Fails with a unique-constraint violation if the username is taken;
    /// see [`is_unique_violation`].
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<Credential> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            INSERT INTO credentials (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(credential)
    }

    /// Find credential by exact username
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM credentials
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(credential)
    }

    /// Find credential by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Credential>> {
        let credential = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM credentials
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(credential)
    }

    /// Check if username exists
    pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM credentials WHERE username = ?)
            "#,
        )
        .bind(username)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }
}

/// Whether an error came from the `UNIQUE` constraint on `username`
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
        _ => false,
    }
}
