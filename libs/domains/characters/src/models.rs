use mongodb::bson::{Bson, Document, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// Collection holding every character document.
pub const COLLECTION: &str = "characters";

pub const REAL_NAME: &str = "realName";
pub const NICKNAME: &str = "nickname";
pub const DESCRIPTION: &str = "description";

/// The three fields every character carries, in schema order.
pub const KNOWN_FIELDS: [&str; 3] = [REAL_NAME, NICKNAME, DESCRIPTION];

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 4;

/// Character document as stored in MongoDB.
///
/// Fields merged in by unchecked updates are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "realName")]
    pub real_name: String,
    pub nickname: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Document,
}

impl Character {
    /// Build a new character with a freshly generated ObjectId.
    pub fn new(input: NewCharacter) -> Self {
        Self {
            id: ObjectId::new(),
            real_name: input.real_name,
            nickname: input.nickname,
            description: input.description,
            extra: Document::new(),
        }
    }
}

/// A character that passed create validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCharacter {
    #[schema(example = "Peter Parker")]
    pub real_name: String,
    #[schema(example = "Spiderman")]
    pub nickname: String,
    #[schema(example = "Bitten by a radioactive spider")]
    pub description: String,
}

/// JSON representation returned to clients.
///
/// `_id` is the 24-character hex ObjectId; extra stored fields follow the
/// known ones as relaxed extended JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CharacterResponse {
    #[serde(rename = "_id")]
    #[schema(example = "65f0c0ffee0ddba11ad5eed5")]
    pub id: String,
    #[serde(rename = "realName")]
    pub real_name: String,
    pub nickname: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        let extra = character
            .extra
            .into_iter()
            .map(|(key, value)| (key, Bson::into_relaxed_extjson(value)))
            .collect();

        Self {
            id: character.id.to_hex(),
            real_name: character.real_name,
            nickname: character.nickname,
            description: character.description,
            extra,
        }
    }
}

/// Raw `page`/`pageSize` query values.
///
/// Kept as strings so that garbage falls back to the defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Items per page (default 4)
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl PageParams {
    /// Resolve to `(page, page_size)`, substituting defaults for missing,
    /// non-numeric, zero or negative values.
    pub fn resolve(&self) -> (u64, u64) {
        (
            positive_or(self.page.as_deref(), DEFAULT_PAGE),
            positive_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
        )
    }
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// One page of results plus the numbers reported in the `X-*` headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

/// `?nickname=` lookup key.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NicknameQuery {
    /// Nickname to match, case-insensitively and exactly
    pub nickname: Option<String>,
}
