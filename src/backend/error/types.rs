/**
 * Backend Error Types
 *
 * `BackendError` is what HTTP handlers return. It wraps the forum's error
 * taxonomy and adds the few failures that only exist at the HTTP layer.
 *
 * # Status Code Mapping
 *
 * | Error | Status |
 * |---|---|
 * | `Validation` | 400 |
 * | `Authentication` | 401 |
 * | `NotFound` | 404 |
 * | `Conflict` | 409 |
 * | `Reference`, `Internal` | 500 |
 * | `Unavailable` | 503 |
 * | `NotAuthenticated` | 303 to `/login` |
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::error::ForumError;

/// Where anonymous sessions are sent when they hit a guarded page
pub const LOGIN_PATH: &str = "/login";

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum BackendError {
    /// Failure from a forum operation
    #[error(transparent)]
    Forum(#[from] ForumError),

    /// Failure decided by the HTTP layer itself
    #[error("Handler error: {message}")]
    HandlerError { status: StatusCode, message: String },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Forum(err) => match err {
                ForumError::Validation { .. } => StatusCode::BAD_REQUEST,
                ForumError::Conflict { .. } => StatusCode::CONFLICT,
                ForumError::Authentication => StatusCode::UNAUTHORIZED,
                ForumError::NotFound { .. } => StatusCode::NOT_FOUND,
                ForumError::NotAuthenticated => StatusCode::SEE_OTHER,
                ForumError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ForumError::Reference { .. } | ForumError::Internal { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Message that goes into the response body
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Forum(err) => err.public_message(),
        }
    }

    /// Whether the response is a redirect to the login page
    pub fn redirects_to_login(&self) -> bool {
        matches!(self, Self::Forum(ForumError::NotAuthenticated))
    }
}
