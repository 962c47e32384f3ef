//! Extraction response models

use serde::{Deserialize, Serialize};

use crate::models::document::{DocumentFormat, FileInfo};

/// Result of a successful extraction, before serialization
#[derive(Debug, Clone)]
pub struct Extraction {
    pub text: String,
    pub format: DocumentFormat,
}

/// Successful extraction response for POST /extract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub status: String,
    pub filename: String,
    pub extracted_text: String,
    pub text_length: usize,
    pub file_info: FileInfo,
    pub message: String,
}

impl ExtractionResponse {
    pub fn new(filename: String, text: String, file_info: FileInfo) -> Self {
        let text_length = text.chars().count();
        Self {
            status: "success".to_string(),
            filename,
            extracted_text: text,
            text_length,
            file_info,
            message: "Text extraction completed successfully".to_string(),
        }
    }
}

/// Per-file outcome within a batch extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Success(ExtractionResponse),
    Failure(BatchFailure),
}

/// A failed file within a batch; other files are unaffected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub status: String,
    pub filename: String,
    pub error: String,
    pub message: String,
}

impl BatchFailure {
    pub fn new(filename: String, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            filename,
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Response for POST /extract/batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchExtractionResponse {
    pub status: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<BatchOutcome>,
}

impl BatchExtractionResponse {
    pub fn new(results: Vec<BatchOutcome>) -> Self {
        let total = results.len();
        let succeeded = results
            .iter()
            .filter(|r| matches!(r, BatchOutcome::Success(_)))
            .count();
        let failed = total - succeeded;
        let status = if failed == 0 { "success" } else { "partial" };
        Self {
            status: status.to_string(),
            total,
            succeeded,
            failed,
            results,
        }
    }
}
