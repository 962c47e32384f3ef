//! Security headers middleware
//!
//! Adds security headers to all responses. The service only ever emits
//! JSON, so the content security policy can be locked down completely.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// Middleware that adds security headers to all responses
pub async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // Strict-Transport-Security (HSTS), one year including subdomains
    headers.insert(
        "Strict-Transport-Security",
        "max-age=31536000; includeSubDomains".parse().unwrap(),
    );

    // Prevent MIME sniffing of JSON responses
    headers.insert("X-Content-Type-Options", "nosniff".parse().unwrap());

    // The API serves no pages, so framing is never legitimate
    headers.insert("X-Frame-Options", "DENY".parse().unwrap());

    headers.insert(
        "Referrer-Policy",
        "strict-origin-when-cross-origin".parse().unwrap(),
    );

    // Nothing is renderable; forbid all content sources
    headers.insert(
        "Content-Security-Policy",
        "default-src 'none'; frame-ancestors 'none'".parse().unwrap(),
    );

    response
}

/// Middleware for API routes that adds cache control headers
///
/// Extraction responses can contain document contents; never let an
/// intermediary cache them.
pub async fn api_cache_control_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        "Cache-Control",
        "no-store, no-cache, must-revalidate, private".parse().unwrap(),
    );
    headers.insert("Pragma", "no-cache".parse().unwrap());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "OK"
    }

    #[tokio::test]
    async fn test_security_headers_are_added() {
        let app = Router::new()
            .route("/test", get(test_handler))
            .layer(axum::middleware::from_fn(security_headers_middleware));

        let request = Request::builder()
            .uri("/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert!(response.headers().contains_key("strict-transport-security"));
        assert!(response.headers().contains_key("x-content-type-options"));
        assert!(response.headers().contains_key("content-security-policy"));
        assert_eq!(
            response.headers().get("x-content-type-options").unwrap(),
            "nosniff"
        );
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    }

    #[tokio::test]
    async fn test_api_cache_control_headers() {
        let app = Router::new()
            .route("/api/test", get(test_handler))
            .layer(axum::middleware::from_fn(api_cache_control_middleware));

        let request = Request::builder()
            .uri("/api/test")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert!(response.headers().contains_key("cache-control"));
        assert_eq!(response.headers().get("pragma").unwrap(), "no-cache");
    }
}
