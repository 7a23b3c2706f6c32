//! Error handlers
//!
//! Maps API errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};

use crate::error::types::{ApiError, StorageError};

/// Convert an error to an HTTP status code
pub fn error_to_status_code(err: &ApiError) -> StatusCode {
    match err {
        ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ApiError::Storage(StorageError::PathEscape(_)) => StatusCode::BAD_REQUEST,
        ApiError::Storage(StorageError::InvalidPath(_)) => StatusCode::BAD_REQUEST,
        ApiError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
        ApiError::Storage(StorageError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
