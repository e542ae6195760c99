//! API routes module
//!
//! Every route the service exposes, mounted at the root (no `/api` prefix).

pub mod characters;
pub mod health;

use axum::{Router, routing::get};
use axum_helpers::health_router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .nest("/characters", characters::router(state))
        .merge(health::router(state.clone()))
        .merge(health_router(state.config.app.clone()))
}

/// Liveness probe kept for clients that only hit `/`
async fn hello() -> &'static str {
    "Hello World!"
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{CharactersConfig, Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use mongodb::{Client, options::ClientOptions};
    use std::time::Duration;
    use tower::ServiceExt;

    /// State whose client points at a port nothing listens on.
    pub(crate) async fn unreachable_state() -> AppState {
        let mongodb = MongoConfig::with_database("mongodb://127.0.0.1:1", "marvel");
        let mut options = ClientOptions::parse(&mongodb.url).await.unwrap();
        options.server_selection_timeout = Some(Duration::from_millis(200));
        let mongo_client = Client::with_options(options).unwrap();
        let db = mongo_client.database(mongodb.database());

        AppState {
            config: Config {
                app: app_info!(),
                mongodb,
                server: ServerConfig::default(),
                environment: Environment::Development,
                characters: CharactersConfig::default(),
            },
            mongo_client,
            db,
        }
    }

    #[tokio::test]
    async fn test_root_says_hello() {
        let app = routes(&unreachable_state().await);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Hello World!");
    }

    #[tokio::test]
    async fn test_health_reports_crate_info() {
        let app = routes(&unreachable_state().await);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["name"], "characters_api");
    }

    #[tokio::test]
    async fn test_nickname_lookup_requires_parameter() {
        for uri in ["/characters", "/characters?nickname="] {
            let app = routes(&unreachable_state().await);

            let response = app
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["message"], "Parameter \"nickname\" is required.");
        }
    }

    #[tokio::test]
    async fn test_nickname_delete_without_parameter_is_not_found() {
        let app = routes(&unreachable_state().await);

        let response = app
            .oneshot(
                Request::delete("/characters")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Character not found with nickname: ");
    }

    #[tokio::test]
    async fn test_invalid_id_is_rejected_without_database() {
        let app = routes(&unreachable_state().await);

        let response = app
            .oneshot(
                Request::get("/characters/not-an-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
