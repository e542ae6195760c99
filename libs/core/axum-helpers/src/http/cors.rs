use axum::http::{HeaderName, HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Response headers browsers may read on cross-origin requests.
const EXPOSED_HEADERS: [&str; 4] = ["x-page", "x-page-size", "x-total-pages", "x-total-results"];

/// Creates a CORS layer for the given origins.
///
/// Origins that are not valid header values are skipped with a warning.
/// Pagination headers are exposed so browser clients can page through lists.
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(EXPOSED_HEADERS.map(HeaderName::from_static))
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_allowed_origin_is_echoed() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(create_cors_layer(&["http://localhost:3000".to_string()]));

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_unknown_origin_gets_no_allow_header() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(create_cors_layer(&["http://localhost:3000".to_string()]));

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
