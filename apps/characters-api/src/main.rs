use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(
        "Connecting to MongoDB at {}",
        config.mongodb.redacted_url()
    );

    // Single attempt: an unreachable database is fatal at startup
    let mongo_client = database::mongodb::connect_from_config(&config.mongodb).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    api::characters::spawn_index_setup(&state);

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &state.config.server);

    info!(
        update_validation = %state.config.characters.update_validation,
        "Starting Marvel Characters API (30s shutdown timeout)"
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        router,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Marvel Characters API shutdown complete");
    Ok(())
}
