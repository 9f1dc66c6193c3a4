//! Error types for the feed API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Bodies
//! are always `{ "error": message, "status": code }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schoolfeed_core::DalError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// No valid session, or a failed sign-in.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The signed-in account may not perform this action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The request conflicts with existing data.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A UUID could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DalError> for ApiError {
    fn from(error: DalError) -> Self {
        match error {
            DalError::NotFound(what) => Self::NotFound(what),
            DalError::InvalidCredentials => Self::Unauthorized(error.to_string()),
            DalError::EmailTaken(_) => Self::Conflict(error.to_string()),
            DalError::Store { source } => {
                tracing::error!(error = %source, "Store request failed");
                Self::Internal(String::from("store unavailable"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::InvalidUuid(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
