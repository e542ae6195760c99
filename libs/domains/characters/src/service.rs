//! Character Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CharacterError, CharacterResult};
use crate::models::{Character, NewCharacter, Page, PageParams};
use crate::repository::CharacterRepository;
use crate::schema::{UpdateValidation, patch_document};

/// Character service: lookups that turn misses into 404s, update
/// validation and pagination arithmetic on top of the repository.
///
/// Lookup-then-act sequences (update, delete) are not atomic; a concurrent
/// delete can make the second step a no-op.
pub struct CharacterService<R: CharacterRepository> {
    repository: Arc<R>,
    update_validation: UpdateValidation,
}

impl<R: CharacterRepository> CharacterService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            update_validation: UpdateValidation::default(),
        }
    }

    /// Choose how update bodies are validated
    pub fn with_update_validation(mut self, update_validation: UpdateValidation) -> Self {
        self.update_validation = update_validation;
        self
    }

    pub fn update_validation(&self) -> UpdateValidation {
        self.update_validation
    }

    #[instrument(skip(self, input), fields(nickname = %input.nickname))]
    pub async fn create_character(&self, input: NewCharacter) -> CharacterResult<Character> {
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn list_characters(&self) -> CharacterResult<Vec<Character>> {
        self.repository.list().await
    }

    /// One page of characters with the totals needed for the `X-*` headers.
    ///
    /// A page past the end yields an empty list without querying the store,
    /// so offsets beyond what the driver can encode never reach it.
    #[instrument(skip(self))]
    pub async fn list_page(&self, params: PageParams) -> CharacterResult<Page<Character>> {
        let (page, page_size) = params.resolve();
        let skip = (page - 1).saturating_mul(page_size);
        let limit = i64::try_from(page_size).unwrap_or(i64::MAX);

        let total_results = self.repository.count().await?;
        let items = if skip >= total_results {
            Vec::new()
        } else {
            self.repository.list_page(skip, limit).await?
        };

        Ok(Page {
            items,
            page,
            page_size,
            total_pages: total_results.div_ceil(page_size),
            total_results,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_character(&self, id: ObjectId) -> CharacterResult<Character> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CharacterError::NotFoundById(id))
    }

    /// Case-insensitive exact lookup. A missing or empty nickname is a 400.
    #[instrument(skip(self))]
    pub async fn get_by_nickname(&self, nickname: Option<&str>) -> CharacterResult<Character> {
        let nickname = required_nickname(nickname)?;
        self.find_by_nickname(nickname).await
    }

    /// Merge `patch` into the character with this id.
    #[instrument(skip(self, patch))]
    pub async fn update_character(&self, id: ObjectId, patch: Value) -> CharacterResult<()> {
        let fields = patch_document(&patch, self.update_validation)?;
        let existing = self.get_character(id).await?;

        if fields.is_empty() {
            return Ok(());
        }
        self.repository.set_fields(existing.id, fields).await
    }

    /// Merge `patch` into the character matching `nickname`.
    #[instrument(skip(self, patch))]
    pub async fn update_by_nickname(
        &self,
        nickname: Option<&str>,
        patch: Value,
    ) -> CharacterResult<()> {
        let nickname = required_nickname(nickname)?;
        let fields = patch_document(&patch, self.update_validation)?;
        let existing = self.find_by_nickname(nickname).await?;

        if fields.is_empty() {
            return Ok(());
        }
        self.repository.set_fields(existing.id, fields).await
    }

    #[instrument(skip(self))]
    pub async fn delete_character(&self, id: ObjectId) -> CharacterResult<()> {
        let existing = self.get_character(id).await?;

        if self.repository.delete(existing.id).await? {
            Ok(())
        } else {
            Err(CharacterError::NotFoundById(id))
        }
    }

    /// Delete the character matching `nickname`.
    ///
    /// Without a nickname nothing can match, so this is a 404 and the store
    /// is not queried.
    #[instrument(skip(self))]
    pub async fn delete_by_nickname(&self, nickname: Option<&str>) -> CharacterResult<()> {
        let nickname = match nickname {
            Some(nickname) if !nickname.is_empty() => nickname,
            other => {
                return Err(CharacterError::NotFoundByNickname(
                    other.unwrap_or_default().to_string(),
                ));
            }
        };

        let existing = self.find_by_nickname(nickname).await?;
        if self.repository.delete(existing.id).await? {
            Ok(())
        } else {
            Err(CharacterError::NotFoundByNickname(nickname.to_string()))
        }
    }

    /// Create the nickname index.
    pub async fn ensure_indexes(&self) -> CharacterResult<()> {
        self.repository.ensure_indexes().await
    }

    async fn find_by_nickname(&self, nickname: &str) -> CharacterResult<Character> {
        self.repository
            .get_by_nickname(nickname)
            .await?
            .ok_or_else(|| CharacterError::NotFoundByNickname(nickname.to_string()))
    }
}

impl<R: CharacterRepository> Clone for CharacterService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            update_validation: self.update_validation,
        }
    }
}

fn required_nickname(nickname: Option<&str>) -> CharacterResult<&str> {
    nickname
        .filter(|nickname| !nickname.is_empty())
        .ok_or(CharacterError::MissingNickname)
}
