//! Application state management.
//!
//! The shared state handed to route builders: configuration plus the single
//! MongoDB client created at startup.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the client and database handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// Database holding the `characters` collection
    pub db: Database,
}
