//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use webgen_types::error::{DraftError, StoreError};

use crate::http::response::ApiResponse;

/// Application-level error raised by a handler.
#[derive(Debug)]
pub enum AppError {
    /// No website stored under the slug.
    NotFound(String),
    /// Request body rejected before reaching the store.
    Validation(String),
    /// Store write failed.
    Store(StoreError),
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<DraftError> for AppError {
    fn from(e: DraftError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("store task failed: {e}"))
    }
}

impl AppError {
    /// Machine-readable code and message for the envelope.
    pub fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::NotFound(slug) => (
                "WEBSITE_NOT_FOUND",
                format!("Website '{slug}' not found"),
            ),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Store(e) => ("STORAGE_ERROR", e.to_string()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        }
    }
}

/// An [`AppError`] stamped with the meta of the request that failed.
///
/// Built with [`RequestTimer::fail`](crate::http::response::RequestTimer::fail).
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub request_id: String,
    pub response_time_ms: u64,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = self.error.code_and_message();
        match &self.error {
            AppError::Store(e) => {
                tracing::error!(request_id = %self.request_id, error = %e, "website store write failed");
            }
            AppError::Internal(msg) => {
                tracing::error!(request_id = %self.request_id, "internal error: {msg}");
            }
            AppError::NotFound(_) | AppError::Validation(_) => {}
        }
        ApiResponse::error(code, &message, self.request_id, self.response_time_ms).into_response()
    }
}
