// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::splits::SplitError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid recording: {0}")]
    InvalidRecording(String),

    #[error(transparent)]
    MalformedTrack(#[from] SplitError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Activity {digest} was written concurrently")]
    Conflict { digest: String },

    #[error("Expected 1 row affected for activity {digest}, got {affected}")]
    RowCount { digest: String, affected: u64 },

    #[error("Encoding error: {0}")]
    Codec(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict { .. })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidRecording(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_recording",
                Some(msg.clone()),
            ),
            AppError::MalformedTrack(err) => (
                StatusCode::BAD_REQUEST,
                "malformed_track",
                Some(err.to_string()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Conflict { digest } => {
                tracing::warn!(digest = %digest, "Concurrent write conflict");
                (StatusCode::CONFLICT, "conflict", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::RowCount { digest, affected } => {
                tracing::error!(digest = %digest, affected, "Unexpected affected row count");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Codec(msg) | AppError::Decode(msg) => {
                tracing::error!(error = %msg, "Stored data error");
                (StatusCode::INTERNAL_SERVER_ERROR, "data_error", None)
            }
            AppError::Io(err) => {
                tracing::error!(error = %err, "I/O error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
