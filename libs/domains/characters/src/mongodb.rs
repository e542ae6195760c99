//! MongoDB implementation of CharacterRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;

use crate::error::{CharacterError, CharacterResult};
use crate::models::{COLLECTION, Character, NICKNAME, NewCharacter};
use crate::repository::CharacterRepository;

/// MongoDB implementation of the CharacterRepository
#[derive(Clone)]
pub struct MongoCharacterRepository {
    collection: Collection<Character>,
}

impl MongoCharacterRepository {
    /// Repository over the `characters` collection of `db`
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    /// Repository over a custom collection, e.g. a per-test one
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Character>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<Character> {
        &self.collection
    }

    /// Case-insensitive exact match on nickname.
    ///
    /// The value is escaped, so `.` or `*` in a nickname match literally.
    pub(crate) fn nickname_filter(nickname: &str) -> Document {
        let pattern = format!("^{}$", regex::escape(nickname));
        doc! { NICKNAME: { "$regex": pattern, "$options": "i" } }
    }
}

#[async_trait]
impl CharacterRepository for MongoCharacterRepository {
    #[instrument(skip(self, input), fields(nickname = %input.nickname))]
    async fn create(&self, input: NewCharacter) -> CharacterResult<Character> {
        let character = Character::new(input);

        self.collection
            .insert_one(&character)
            .await
            .map_err(CharacterError::database("Failed to create character"))?;

        tracing::info!(character_id = %character.id, "Character created");
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CharacterResult<Vec<Character>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(CharacterError::database("Failed to fetch characters"))?;

        cursor
            .try_collect()
            .await
            .map_err(CharacterError::database("Failed to fetch characters"))
    }

    #[instrument(skip(self))]
    async fn list_page(&self, skip: u64, limit: i64) -> CharacterResult<Vec<Character>> {
        let options = FindOptions::builder().skip(skip).limit(limit).build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(CharacterError::database("Failed to fetch paginated characters"))?;

        cursor
            .try_collect()
            .await
            .map_err(CharacterError::database("Failed to fetch paginated characters"))
    }

    #[instrument(skip(self))]
    async fn count(&self) -> CharacterResult<u64> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(CharacterError::database("Failed to count characters"))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> CharacterResult<Option<Character>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(CharacterError::database("Failed to fetch character"))
    }

    #[instrument(skip(self))]
    async fn get_by_nickname(&self, nickname: &str) -> CharacterResult<Option<Character>> {
        self.collection
            .find_one(Self::nickname_filter(nickname))
            .await
            .map_err(CharacterError::database("Failed to fetch character"))
    }

    #[instrument(skip(self, fields))]
    async fn set_fields(&self, id: ObjectId, fields: Document) -> CharacterResult<()> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await
            .map_err(CharacterError::database("Failed to update character"))?;

        tracing::info!(character_id = %id, "Character updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> CharacterResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(CharacterError::database("Failed to delete character"))?;

        if result.deleted_count > 0 {
            tracing::info!(character_id = %id, "Character deleted");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn ensure_indexes(&self) -> CharacterResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { NICKNAME: "text" })
            .options(
                IndexOptions::builder()
                    .name("nickname_text".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(CharacterError::database("Failed to create nickname index"))?;
        Ok(())
    }
}
