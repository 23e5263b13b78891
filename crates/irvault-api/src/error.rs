//! HTTP error response conversion
//!
//! `HttpAppError` wraps `AppError` so it can implement `IntoResponse`
//! (orphan rules: both trait and error type live in other crates). Client
//! bodies carry only the error's display text, never internals.
//!
//! The upload endpoints have their own legacy failure shapes and build
//! those responses in their handlers; this type covers the generic
//! `{"error": ...}` shape used by the query endpoint and the middleware.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use irvault_core::AppError;
use irvault_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::Storage(err.to_string()))
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                tracing::debug!(error = %app_error, "Request rejected")
            }
            _ => tracing::error!(error = %app_error, "Request failed"),
        }

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
        });
        (status, body).into_response()
    }
}
