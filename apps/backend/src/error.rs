//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use vocab_core::{ImportError, ReviewError, StoreError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Import(ImportError::Decoding) => (StatusCode::BAD_REQUEST, "unsupported_format"),
            ApiError::Import(ImportError::MissingRequiredColumns { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "missing_required_columns")
            }
            ApiError::Import(ImportError::UnknownColumn(_)) => (StatusCode::BAD_REQUEST, "unknown_column"),
            ApiError::Import(ImportError::DuplicateOverride { .. }) => {
                (StatusCode::BAD_REQUEST, "duplicate_column")
            }
            ApiError::Import(ImportError::Spreadsheet(_)) => (StatusCode::BAD_REQUEST, "invalid_spreadsheet"),
            ApiError::Import(ImportError::Csv(_) | ImportError::XlsxWrite(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            ApiError::Review(ReviewError::InvalidRating(_)) => (StatusCode::BAD_REQUEST, "invalid_rating"),
            ApiError::Review(ReviewError::Store(_)) | ApiError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error")
            }
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
