//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use cinema_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Error category, e.g. `CONFLICT`.
    pub error: String,
    /// Machine-readable code, e.g. `SEAT_UNAVAILABLE`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] on its way out of a handler.
///
/// Handlers return `Result<_, ApiError>` and use `?` on service calls;
/// the conversion from `AppError` is implicit.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status and category label for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation | ErrorKind::Serialization => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        }
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Payment => (StatusCode::PAYMENT_REQUIRED, "PAYMENT_ERROR"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Internal | ErrorKind::Database | ErrorKind::Configuration => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, category) = status_for(err.kind);

        // Server-side failures only expose messages the service wrote for
        // the customer (those carry a code); raw store errors stay in the log.
        let message = if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err, "Request failed with server error");
            match err.code {
                Some(_) => err.message.clone(),
                None => "An internal error occurred".to_string(),
            }
        } else {
            err.message.clone()
        };

        let body = ApiErrorResponse {
            error: category.to_string(),
            code: err.code.unwrap_or(category).to_string(),
            message,
            details: err.details,
        };

        (status, Json(body)).into_response()
    }
}
