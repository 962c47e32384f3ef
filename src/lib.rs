//! Extract API Library
//!
//! This crate provides the core functionality for the Extract API, an
//! HTTP service that extracts plain text from uploaded documents.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use services::{ExtractionService, TextCache};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Extraction service
    pub extractor: Arc<ExtractionService>,
    /// Extraction result cache (optional)
    pub cache: Option<Arc<TextCache>>,
}
