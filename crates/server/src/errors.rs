use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Generic body for every store failure; the cause only goes to the log.
pub const SERVER_ERROR_BODY: &str = "Server error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input problem, reported back as plain text.
    #[error("{0}")]
    BadRequest(String),
    /// Store or infrastructure failure.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            ServiceError::UnknownColumn(col) => ApiError::BadRequest(format!("Unknown column: {col}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(detail) => {
                error!(error = %detail, "store query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY).into_response()
            }
        }
    }
}
