//! Application error handling
//!
//! Every error is converted to a page at the request boundary. Internal
//! details are logged and replaced by a generic message.

use crate::views;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use login_portal_shared::{AuthError, ValidationError};
use thiserror::Error;
use tracing::error;

/// Error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::DuplicateUsername) => StatusCode::CONFLICT,
            AppError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is a server fault rather than a rejected request
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Internal(_))
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();
        (status, views::error_page(status, &message)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
