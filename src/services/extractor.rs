//! Extraction service
//!
//! Resolves the document format from the filename, guards against empty
//! or oversized uploads, consults the result cache, and dispatches to the
//! per-format extractors on the blocking thread pool.

use std::sync::Arc;

use tokio::task;
use tracing::{debug, info};

use crate::config::ExtractionConfig;
use crate::models::{DocumentFormat, Extraction};
use crate::services::cache::TextCache;
use crate::services::formats;
use crate::utils::error::{AppError, AppResult};
use crate::utils::validation;

/// Shared extraction service
#[derive(Debug)]
pub struct ExtractionService {
    config: ExtractionConfig,
    cache: Option<Arc<TextCache>>,
}

impl ExtractionService {
    pub fn new(config: ExtractionConfig, cache: Option<Arc<TextCache>>) -> Self {
        Self { config, cache }
    }

    /// Maximum accepted upload size in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.config.max_file_size_mb * 1024 * 1024
    }

    /// Maximum accepted upload size in megabytes
    pub fn max_file_size_mb(&self) -> u64 {
        self.config.max_file_size_mb
    }

    /// Maximum number of files accepted per batch request
    pub fn max_batch_files(&self) -> usize {
        self.config.max_batch_files
    }

    pub fn cache(&self) -> Option<&Arc<TextCache>> {
        self.cache.as_ref()
    }

    /// Resolve the document format from a (sanitized) filename
    pub fn resolve_format(&self, filename: &str) -> AppResult<DocumentFormat> {
        validation::file_extension(filename)
            .and_then(|ext| DocumentFormat::from_extension(&ext))
            .ok_or_else(|| AppError::UnsupportedFormat {
                filename: filename.to_string(),
            })
    }

    /// Extract text from an uploaded document.
    ///
    /// The filename is used only for logging and error context; the
    /// format must already be resolved.
    pub async fn extract(
        &self,
        filename: &str,
        format: DocumentFormat,
        data: Vec<u8>,
    ) -> AppResult<Extraction> {
        if data.is_empty() {
            return Err(AppError::ValidationError(format!(
                "file {} is empty",
                filename
            )));
        }
        if data.len() as u64 > self.max_file_size_bytes() {
            return Err(AppError::PayloadTooLarge {
                limit_mb: self.config.max_file_size_mb,
            });
        }

        let cache_key = self.cache.as_ref().map(|_| TextCache::content_key(&data));
        if let (Some(cache), Some(key)) = (&self.cache, &cache_key) {
            if let Some(hit) = cache.get(key).await {
                debug!(filename = %filename, "serving extraction from cache");
                return Ok(hit);
            }
        }

        info!(
            filename = %filename,
            size = data.len(),
            format = ?format,
            "extracting text"
        );

        let pdf_max_pages = self.config.pdf_max_pages;
        let result = task::spawn_blocking(move || extract_sync(format, &data, pdf_max_pages))
            .await
            .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))?;

        let text = match result {
            Ok(text) => normalize(&text),
            Err(e) => {
                return Err(AppError::Extraction {
                    filename: filename.to_string(),
                    message: e.to_string(),
                })
            }
        };

        info!(
            filename = %filename,
            characters = text.chars().count(),
            "text extraction completed"
        );

        let extraction = Extraction { text, format };
        if let (Some(cache), Some(key)) = (&self.cache, cache_key) {
            cache.set(key, extraction.clone()).await;
        }

        Ok(extraction)
    }
}

/// Synchronous format dispatch, run on the blocking pool
fn extract_sync(
    format: DocumentFormat,
    data: &[u8],
    pdf_max_pages: usize,
) -> anyhow::Result<String> {
    match format {
        DocumentFormat::Pdf => formats::pdf::extract(data, pdf_max_pages),
        DocumentFormat::Docx => formats::ooxml::extract_docx(data),
        DocumentFormat::Pptx => formats::ooxml::extract_pptx(data),
        DocumentFormat::Xlsx | DocumentFormat::Xls => formats::spreadsheet::extract_workbook(data),
        DocumentFormat::Csv => formats::spreadsheet::extract_csv(data),
        DocumentFormat::Txt => formats::text::extract(data),
        DocumentFormat::Rtf => formats::rtf::extract(data),
        DocumentFormat::Odt => formats::opendocument::extract(data),
        DocumentFormat::Html => formats::html::extract(data),
        DocumentFormat::Eml => formats::email::extract(data),
        DocumentFormat::Epub => formats::epub::extract(data),
    }
}

/// Normalize line endings and strip surrounding whitespace
fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}
