//! Middleware components
//!
//! This module contains middleware for:
//! - Rate limiting (per client IP)
//! - Security headers and API cache control

pub mod rate_limit;
pub mod security_headers;

pub use rate_limit::{
    api_rate_limit_config, create_rate_limit_state, extract_rate_limit_config,
    rate_limit_middleware, spawn_rate_limit_cleanup, RateLimitConfig, RateLimitState,
};
pub use security_headers::{api_cache_control_middleware, security_headers_middleware};
