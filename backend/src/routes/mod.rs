//! Route definitions for the Login Portal
//!
//! This module organizes all routes and applies middleware.

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod home;

#[cfg(test)]
mod auth_tests;

pub use auth::{auth_routes, PageError};

/// Largest accepted request body; the forms carry two short fields
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .merge(auth::auth_routes())
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        // Apply middleware layers
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
