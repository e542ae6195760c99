//! MongoDB connector and utilities

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{MongoError, client_options, connect_from_config};
pub use health::ping;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
