//! Characters API routes
//!
//! Wires the characters domain to HTTP routes and kicks off index creation.

use axum::Router;
use domain_characters::{CharacterService, MongoCharacterRepository, handlers};
use tracing::{info, warn};

use crate::state::AppState;

/// Create characters router
pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}

fn service(state: &AppState) -> CharacterService<MongoCharacterRepository> {
    let repository = MongoCharacterRepository::new(&state.db);
    CharacterService::new(repository)
        .with_update_validation(state.config.characters.update_validation)
}

/// Create the nickname text index in the background.
///
/// The outcome is only logged; requests are served whether or not it succeeds.
pub fn spawn_index_setup(state: &AppState) -> tokio::task::JoinHandle<()> {
    let service = service(state);

    tokio::spawn(async move {
        match service.ensure_indexes().await {
            Ok(()) => info!("Nickname index ready on characters collection"),
            Err(e) => warn!(error = ?e, "Failed to create nickname index"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::unreachable_state;

    #[tokio::test]
    async fn test_index_setup_failure_does_not_panic() {
        let state = unreachable_state().await;
        let handle = spawn_index_setup(&state);
        assert!(handle.await.is_ok());
    }
}
