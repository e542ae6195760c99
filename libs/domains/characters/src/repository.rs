use async_trait::async_trait;
use mongodb::bson::{Document, oid::ObjectId};

use crate::error::CharacterResult;
use crate::models::{Character, NewCharacter};

/// Repository trait for Character persistence
///
/// Lookups return `Ok(None)` for missing documents; turning that into a 404
/// is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Insert a new character and return it with its assigned id
    async fn create(&self, input: NewCharacter) -> CharacterResult<Character>;

    /// Every character, in store order
    async fn list(&self) -> CharacterResult<Vec<Character>>;

    /// A window of characters, in store order
    async fn list_page(&self, skip: u64, limit: i64) -> CharacterResult<Vec<Character>>;

    /// Total number of characters
    async fn count(&self) -> CharacterResult<u64>;

    async fn get_by_id(&self, id: ObjectId) -> CharacterResult<Option<Character>>;

    /// First character whose nickname equals `nickname`, ignoring case
    async fn get_by_nickname(&self, nickname: &str) -> CharacterResult<Option<Character>>;

    /// `$set` the given fields on the character with this id
    async fn set_fields(&self, id: ObjectId, fields: Document) -> CharacterResult<()>;

    /// Delete by id, returning whether a document was removed
    async fn delete(&self, id: ObjectId) -> CharacterResult<bool>;

    /// Create the indexes lookups rely on
    async fn ensure_indexes(&self) -> CharacterResult<()>;
}
