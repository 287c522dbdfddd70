use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use md_pull_sdk::PullError;
use serde_json::json;

/// Unified error type that renders as a JSON `{"error": "..."}` response
/// with an appropriate HTTP status code.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<PullError> for AppError {
    fn from(e: PullError) -> Self {
        match &e {
            PullError::PackNotFound(_) | PullError::BaselinePackNotFound => {
                AppError::not_found(e.to_string())
            }
            PullError::InvalidArgument(_) => AppError::bad_request(e.to_string()),
            PullError::CatalogUnavailable(_) => AppError::bad_gateway(e.to_string()),
            PullError::PoolExhausted(_) | PullError::Internal(_) => {
                AppError::internal(e.to_string())
            }
        }
    }
}
