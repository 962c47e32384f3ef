//! Health check endpoints
//!
//! Provides health check endpoints for monitoring and load balancers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::models::DocumentFormat;
use crate::AppState;

/// Basic health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Detailed health response with component status
#[derive(Serialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub version: String,
    pub components: ComponentHealth,
}

/// Health status of individual components
#[derive(Serialize)]
pub struct ComponentHealth {
    pub extractor: ComponentStatus,
    pub cache: ComponentStatus,
}

/// Status of a single component
#[derive(Serialize)]
pub struct ComponentStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    fn healthy_with(message: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            message: Some(message.into()),
        }
    }

    fn not_configured() -> Self {
        Self {
            status: "not_configured".to_string(),
            message: None,
        }
    }
}

/// Simple health check endpoint (for load balancers)
///
/// Returns 200 OK if the service is running.
/// Does not check component health.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Detailed health check endpoint
///
/// Reports the status of the extractor registry and the result cache.
pub async fn health_check_detailed(
    State(state): State<AppState>,
) -> (StatusCode, Json<DetailedHealthResponse>) {
    let extractor_status =
        ComponentStatus::healthy_with(format!("{} formats registered", DocumentFormat::ALL.len()));

    let cache_status = match &state.cache {
        Some(cache) => {
            let stats = cache.stats().await;
            ComponentStatus::healthy_with(format!(
                "{}/{} entries",
                stats.valid_entries, stats.max_entries
            ))
        }
        None => ComponentStatus::not_configured(),
    };

    let response = DetailedHealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        components: ComponentHealth {
            extractor: extractor_status,
            cache: cache_status,
        },
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe (for Kubernetes)
///
/// Returns 200 OK if the process is alive.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe (for Kubernetes)
///
/// The service holds no external connections, so readiness follows
/// liveness.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_check_returns_version() {
        let response = health_check().await;
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_health_check_returns_timestamp() {
        let response = health_check().await;
        assert!(!response.timestamp.is_empty());
    }

    #[test]
    fn test_component_status_healthy_with_message() {
        let status = ComponentStatus::healthy_with("12 formats registered");
        assert_eq!(status.status, "healthy");
        assert_eq!(status.message.as_deref(), Some("12 formats registered"));
    }

    #[test]
    fn test_component_status_not_configured() {
        let status = ComponentStatus::not_configured();
        assert_eq!(status.status, "not_configured");
    }
}
