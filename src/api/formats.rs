//! Supported formats endpoint

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::DocumentFormat;
use crate::AppState;

/// Response for GET /formats
#[derive(Serialize)]
pub struct FormatsResponse {
    /// Extensions grouped by category
    pub supported_formats: BTreeMap<&'static str, Vec<&'static str>>,
    pub total_formats: usize,
    pub max_file_size: String,
    pub note: String,
}

/// Get detailed information about supported file formats
pub async fn supported_formats(State(state): State<AppState>) -> Json<FormatsResponse> {
    let mut grouped: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for format in DocumentFormat::ALL {
        grouped
            .entry(format.category().as_str())
            .or_default()
            .extend(format.extensions());
    }

    let total_formats = DocumentFormat::supported_extensions().len();

    Json(FormatsResponse {
        supported_formats: grouped,
        total_formats,
        max_file_size: format!("{}MB", state.extractor.max_file_size_mb()),
        note: "Scanned images and OCR-dependent formats are not supported".to_string(),
    })
}
