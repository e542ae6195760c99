//! Database connectors and utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client setup and health checks
//! - `config` - `core_config::FromEnv` support for connection settings
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "marvel");
//! let client = connect_from_config(&config).await?;
//! let characters = client.database(config.database()).collection::<Document>("characters");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
