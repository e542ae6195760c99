//! Characters Domain
//!
//! CRUD over the `characters` MongoDB collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← 404 mapping, update policy, pagination
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Documents, DTOs, schema checks
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_characters::{handlers, MongoCharacterRepository, CharacterService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("marvel");
//!
//! let repository = MongoCharacterRepository::new(&db);
//! let service = CharacterService::new(repository);
//!
//! let router = axum::Router::new().nest("/characters", handlers::router(service));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod schema;
pub mod service;

pub use error::{CharacterError, CharacterResult};
pub use handlers::ApiDoc;
pub use models::{Character, CharacterResponse, NewCharacter, Page, PageParams};
pub use mongodb::MongoCharacterRepository;
pub use repository::CharacterRepository;
pub use schema::UpdateValidation;
pub use service::CharacterService;
