//! Service error taxonomy and its translation to HTTP responses
//!
//! Services return [`ServiceError`]; the router layer is the only place
//! where error kinds become status codes. Unexpected failures are logged
//! with full detail and reach the client as an opaque 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Typed failures raised by the auth, task, and profile services
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// Duplicate email
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials, or a missing/malformed/expired token
    #[error("{0}")]
    Auth(String),

    /// No record with the given id (or not visible to the caller)
    #[error("{0}")]
    NotFound(String),

    /// Anything unexpected from the storage layer
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ServiceError::Conflict("Email already exists".to_string()),
            other => ServiceError::Store(other),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(msg) | ServiceError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({"message": msg}))).into_response()
            }
            ServiceError::Auth(msg) => {
                (StatusCode::UNAUTHORIZED, Json(json!({"message": msg}))).into_response()
            }
            ServiceError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({"message": msg}))).into_response()
            }
            ServiceError::Store(err) => {
                error!("Unhandled store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"success": false, "message": "Server error"})),
                )
                    .into_response()
            }
        }
    }
}

/// Type alias for service results
pub type ServiceResult<T> = Result<T, ServiceError>;
