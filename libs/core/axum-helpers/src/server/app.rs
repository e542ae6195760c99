use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Combines application routes with documentation and cross-cutting layers.
///
/// The returned router serves:
/// - `routes` as given (state already applied by the caller)
/// - Swagger UI at `/swagger-ui`, backed by `/api-docs/openapi.json`
/// - a JSON 404 for anything else
///
/// Layers: request tracing, security headers, response compression, and a
/// CORS layer when `server_config.cors_allowed_origins` is non-empty.
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let routes = Router::new().route("/example", get(handler)).with_state(state);
/// let router = create_router::<ApiDoc>(routes, &ServerConfig::default());
/// ```
pub fn create_router<T>(routes: Router, server_config: &ServerConfig) -> Router
where
    T: OpenApi + 'static,
{
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    let router = if server_config.cors_allowed_origins.is_empty() {
        router
    } else {
        info!(
            origins = ?server_config.cors_allowed_origins,
            "CORS configured"
        );
        router.layer(create_cors_layer(&server_config.cors_allowed_origins))
    };

    router.layer(CompressionLayer::new())
}

/// Serves `router` until SIGTERM/SIGINT, then runs `cleanup` within `shutdown_timeout`.
///
/// # Errors
/// Fails if the listener cannot bind or the server stops with an I/O error.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    serve_with_cleanup(listener, router, shutdown_signal(), shutdown_timeout, cleanup).await
}

/// Serves `router` on `listener` until `signal` resolves.
///
/// Once the signal fires the listener stops accepting connections and
/// in-flight requests run to completion. Only then does `cleanup` start
/// (closing database clients and the like); if it overruns
/// `shutdown_timeout` it is abandoned with a warning. Cleanup also runs when
/// the server stops with an I/O error.
pub async fn serve_with_cleanup<S, F>(
    listener: TcpListener,
    router: Router,
    signal: S,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(signal)
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::sync::oneshot;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    fn app(config: &ServerConfig) -> Router {
        let routes = Router::new().route("/ping", get(|| async { "pong" }));
        create_router::<TestDoc>(routes, config)
    }

    #[tokio::test]
    async fn test_routes_are_served_at_root() {
        let response = app(&ServerConfig::default())
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = app(&ServerConfig::default())
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["code"], 1004);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = app(&ServerConfig::default())
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cors_layer_applied_when_origins_configured() {
        let mut config = ServerConfig::default();
        config.cors_allowed_origins = vec!["http://localhost:3000".to_string()];

        let response = app(&config)
            .oneshot(
                Request::get("/ping")
                    .header("origin", "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_cleanup_runs_after_in_flight_requests_finish() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let started_tx = Arc::new(Mutex::new(Some(started_tx)));

        let handler_events = Arc::clone(&events);
        let routes = Router::new().route(
            "/slow",
            get(move || {
                let events = Arc::clone(&handler_events);
                let started_tx = Arc::clone(&started_tx);
                async move {
                    if let Some(tx) = started_tx.lock().unwrap().take() {
                        let _ = tx.send(());
                    }
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    events.lock().unwrap().push("request");
                    "done"
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let cleanup_events = Arc::clone(&events);
        let server = tokio::spawn(serve_with_cleanup(
            listener,
            routes,
            async move {
                let _ = started_rx.await;
            },
            Duration::from_secs(5),
            async move {
                cleanup_events.lock().unwrap().push("cleanup");
            },
        ));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /slow HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));

        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(*events.lock().unwrap(), vec!["request", "cleanup"]);
    }

    #[tokio::test]
    async fn test_slow_cleanup_is_abandoned_after_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            serve_with_cleanup(
                listener,
                Router::new(),
                async {},
                Duration::from_millis(50),
                std::future::pending::<()>(),
            ),
        )
        .await;

        assert!(result.unwrap().is_ok());
    }
}
