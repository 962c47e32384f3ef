//! Error types and handling
//!
//! This module provides the error handling framework for the application.
//! All errors are converted to a consistent JSON response format.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::DocumentFormat;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request - invalid input (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upload did not include a `file` field (400)
    #[error("No file provided")]
    MissingFile,

    /// Upload included a `file` field without a filename (400)
    #[error("No file selected")]
    MissingFilename,

    /// File extension is not in the supported set (400)
    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    /// Upload exceeds the configured size limit (413)
    #[error("File too large: maximum file size is {limit_mb}MB")]
    PayloadTooLarge { limit_mb: u64 },

    /// Validation failed (422)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Text extraction failed (500)
    #[error("Could not extract text from file: {message}")]
    Extraction { filename: String, message: String },

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration error (500)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service unavailable (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response body
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// Stable error slug used in response bodies
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "bad_request",
            AppError::MissingFile => "no_file",
            AppError::MissingFilename => "no_filename",
            AppError::UnsupportedFormat { .. } => "unsupported_format",
            AppError::PayloadTooLarge { .. } => "file_too_large",
            AppError::ValidationError(_) => "validation_error",
            AppError::Extraction { .. } => "extraction_failed",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::ServiceUnavailable(_) => "service_unavailable",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_type = self.error_type();
        let (status, should_log) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, false),
            AppError::MissingFile => (StatusCode::BAD_REQUEST, false),
            AppError::MissingFilename => (StatusCode::BAD_REQUEST, false),
            AppError::UnsupportedFormat { .. } => (StatusCode::BAD_REQUEST, false),
            AppError::PayloadTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, false),
            AppError::ValidationError(_) => (StatusCode::UNPROCESSABLE_ENTITY, false),
            AppError::Extraction { .. } => (StatusCode::INTERNAL_SERVER_ERROR, true),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, true),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, true),
            AppError::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, true),
        };

        // Log server errors
        if should_log {
            error!(error = %self, error_type = error_type, "Request error");
        }

        let body = match &self {
            AppError::UnsupportedFormat { filename } => {
                ErrorResponse::new(error_type, self.to_string()).with_details(serde_json::json!({
                    "filename": filename,
                    "supported_formats": DocumentFormat::supported_extensions(),
                }))
            }
            AppError::Extraction { filename, .. } => ErrorResponse::new(error_type, self.to_string())
                .with_details(serde_json::json!({ "filename": filename })),
            _ => ErrorResponse::new(error_type, self.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

// Implement From for common error types

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON parsing error: {}", err))
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            // The handler substitutes the configured limit for the message
            AppError::PayloadTooLarge { limit_mb: 0 }
        } else {
            AppError::BadRequest(format!("Invalid multipart request: {}", err))
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::MissingFile;
        assert_eq!(err.to_string(), "No file provided");
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new("no_file", "No file provided");

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("no_file"));
        assert!(json.contains("No file provided"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_error_response_with_details() {
        let response = ErrorResponse::new("extraction_failed", "Could not extract text")
            .with_details(serde_json::json!({"filename": "report.pdf"}));

        assert!(response.details.is_some());
    }

    #[test]
    fn test_payload_too_large_message() {
        let err = AppError::PayloadTooLarge { limit_mb: 16 };
        assert_eq!(err.to_string(), "File too large: maximum file size is 16MB");
    }

    #[test]
    fn test_app_result_type() {
        fn example_handler() -> AppResult<String> {
            Ok("success".to_string())
        }

        assert!(example_handler().is_ok());
    }
}
