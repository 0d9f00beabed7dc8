//! Health check endpoints
//!
//! - /health - the process is up and serving
//! - /health/live - liveness probe, never touches dependencies
//! - /health/ready - readiness probe, fails while the credential database is unreachable

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<CheckStatus>,
}

/// Status of the database check
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn plain(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("healthy"))
}

/// Liveness probe
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::plain("alive"))
}

/// Readiness probe
///
/// Returns 503 when the database does not answer.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match db::health_check(state.db()).await {
        Ok(()) => CheckStatus {
            healthy: true,
            message: None,
        },
        Err(e) => CheckStatus {
            healthy: false,
            message: Some(e.to_string()),
        },
    };

    let (code, status) = if database.healthy {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: Some(database),
        }),
    )
}
