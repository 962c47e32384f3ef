//! API routes and handlers
//!
//! This module defines all API endpoints and their routing.

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

mod extract;
mod formats;
mod health;
mod info;

pub use health::*;

/// Informational routes (service info, health, formats)
pub fn info_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(info::service_info))
        .route("/health", get(health::health_check))
        .route("/health/detailed", get(health::health_check_detailed))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/formats", get(formats::supported_formats))
}

/// Extraction routes (rate limited more strictly than the rest)
pub fn extraction_routes() -> Router<AppState> {
    Router::new()
        .route("/extract", post(extract::extract_document))
        .route("/extract/batch", post(extract::extract_batch))
}

/// Create the full API router (useful for tests)
pub fn routes() -> Router<AppState> {
    info_routes().merge(extraction_routes())
}
