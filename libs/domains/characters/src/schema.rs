//! Request body validation for create and update.
//!
//! Create bodies must be exactly `{realName, nickname, description}` with
//! string values. Every violation is reported, one entry each, in the
//! `validator` error format so the shared error layer can render them.

use std::borrow::Cow;

use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use validator::{ValidationError, ValidationErrors};

use crate::error::{CharacterError, CharacterResult};
use crate::models::{DESCRIPTION, KNOWN_FIELDS, NICKNAME, NewCharacter, REAL_NAME};

/// Error key used for properties outside the schema.
pub const ADDITIONAL_PROPERTIES: &str = "additionalProperties";
/// Error key used when the body itself has the wrong JSON type.
pub const BODY: &str = "body";

pub const CREATE_INVALID: &str = "The submitted data is not valid to create a character";
pub const UPDATE_INVALID: &str = "The submitted data is not valid to update a character";

/// How update bodies are checked before being merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UpdateValidation {
    /// Any keys are merged; known fields must still be strings.
    #[default]
    Unchecked,
    /// Only the known fields are accepted, each a string.
    Schema,
}

/// Unvalidated create body. Converting it into a [`NewCharacter`] runs the
/// create schema once and reports violations under [`CREATE_INVALID`].
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CharacterDraft(pub Value);

impl TryFrom<CharacterDraft> for NewCharacter {
    type Error = CharacterError;

    fn try_from(draft: CharacterDraft) -> CharacterResult<Self> {
        validate_new(&draft.0).map_err(|errors| CharacterError::Validation {
            message: CREATE_INVALID,
            errors,
        })
    }
}

/// Check a create body against the character schema.
pub fn validate_new(body: &Value) -> Result<NewCharacter, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(fields) = body.as_object() else {
        errors.add(BODY, wrong_type("object"));
        return Err(errors);
    };

    for field in KNOWN_FIELDS {
        match fields.get(field) {
            None => errors.add(field, required(field)),
            Some(value) if !value.is_string() => errors.add(field, wrong_type("string")),
            Some(_) => {}
        }
    }
    add_unknown_fields(fields, &mut errors);

    let text = |field: &str| fields.get(field).and_then(Value::as_str).map(str::to_owned);
    match (text(REAL_NAME), text(NICKNAME), text(DESCRIPTION)) {
        (Some(real_name), Some(nickname), Some(description)) if errors.is_empty() => {
            Ok(NewCharacter {
                real_name,
                nickname,
                description,
            })
        }
        _ => Err(errors),
    }
}

/// Turn an update body into the document passed to `$set`.
///
/// The body must be a JSON object that does not touch `_id` or use
/// operator-style (`$`) keys. Known fields must be strings; under
/// [`UpdateValidation::Schema`] unknown fields are rejected too.
pub fn patch_document(body: &Value, policy: UpdateValidation) -> CharacterResult<Document> {
    let Some(fields) = body.as_object() else {
        return Err(CharacterError::InvalidPatch(
            "Update body must be a JSON object".to_string(),
        ));
    };

    if fields.contains_key("_id") {
        return Err(CharacterError::InvalidPatch(
            "Field \"_id\" cannot be updated".to_string(),
        ));
    }
    if let Some(key) = fields.keys().find(|key| key.starts_with('$')) {
        return Err(CharacterError::InvalidPatch(format!(
            "Field \"{key}\" is not a valid field name"
        )));
    }

    let mut errors = ValidationErrors::new();
    for field in KNOWN_FIELDS {
        if fields.get(field).is_some_and(|value| !value.is_string()) {
            errors.add(field, wrong_type("string"));
        }
    }
    if policy == UpdateValidation::Schema {
        add_unknown_fields(fields, &mut errors);
    }
    if !errors.is_empty() {
        return Err(CharacterError::Validation {
            message: UPDATE_INVALID,
            errors,
        });
    }

    mongodb::bson::to_document(fields)
        .map_err(|e| CharacterError::InvalidPatch(format!("Update body cannot be stored: {e}")))
}

fn add_unknown_fields(fields: &Map<String, Value>, errors: &mut ValidationErrors) {
    for key in fields.keys().filter(|key| !KNOWN_FIELDS.contains(&key.as_str())) {
        errors.add(ADDITIONAL_PROPERTIES, additional_property(key));
    }
}

fn required(field: &'static str) -> ValidationError {
    let mut error = ValidationError::new("required")
        .with_message(Cow::Owned(format!("must have required property '{field}'")));
    error.add_param(Cow::Borrowed("missingProperty"), &field);
    error
}

fn wrong_type(expected: &'static str) -> ValidationError {
    let mut error =
        ValidationError::new("type").with_message(Cow::Owned(format!("must be {expected}")));
    error.add_param(Cow::Borrowed("type"), &expected);
    error
}

fn additional_property(key: &str) -> ValidationError {
    let mut error = ValidationError::new("additional_properties")
        .with_message(Cow::Borrowed("must NOT have additional properties"));
    error.add_param(Cow::Borrowed("additionalProperty"), &key);
    error
}
