//! Service information endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::DocumentFormat;
use crate::AppState;

/// Service information response
#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub status: String,
    pub version: String,
    pub supported_formats: Vec<&'static str>,
    pub max_file_size: String,
    pub endpoints: serde_json::Value,
}

/// API information endpoint
pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Document Text Extraction API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        supported_formats: DocumentFormat::supported_extensions(),
        max_file_size: format!("{}MB", state.extractor.max_file_size_mb()),
        endpoints: serde_json::json!({
            "POST /extract": "Extract text from an uploaded document",
            "POST /extract/batch": "Extract text from several documents at once",
            "GET /formats": "Supported file formats",
            "GET /health": "Health check endpoint",
            "GET /": "API information",
        }),
    })
}
