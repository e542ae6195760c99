use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CharacterError {
    #[error("Character not found with id: {0}")]
    NotFoundById(ObjectId),

    #[error("Character not found with nickname: {0}")]
    NotFoundByNickname(String),

    #[error("Parameter \"nickname\" is required.")]
    MissingNickname,

    #[error("{0}")]
    InvalidPatch(String),

    #[error("{message}")]
    Validation {
        message: &'static str,
        errors: ValidationErrors,
    },

    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),

    /// `message` is the per-operation text shown to clients; `source` is only logged.
    #[error("{message}")]
    Database {
        message: &'static str,
        #[source]
        source: mongodb::error::Error,
    },
}

pub type CharacterResult<T> = Result<T, CharacterError>;

impl CharacterError {
    /// Adapter for `map_err` on driver calls.
    pub fn database(message: &'static str) -> impl FnOnce(mongodb::error::Error) -> Self {
        move |source| CharacterError::Database { message, source }
    }
}

/// Convert CharacterError to AppError for standardized error responses
impl From<CharacterError> for AppError {
    fn from(err: CharacterError) -> Self {
        match err {
            CharacterError::NotFoundById(_) | CharacterError::NotFoundByNickname(_) => {
                AppError::NotFound(err.to_string())
            }
            CharacterError::MissingNickname => AppError::BadRequest(err.to_string()),
            CharacterError::InvalidPatch(msg) => AppError::BadRequest(msg),
            CharacterError::Validation { message, errors } => AppError::Validation {
                message: message.to_string(),
                errors,
            },
            CharacterError::MalformedBody(rejection) => AppError::JsonExtractorRejection(rejection),
            CharacterError::Database { message, source } => AppError::Database {
                message: message.to_string(),
                source,
            },
        }
    }
}

impl IntoResponse for CharacterError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
