//! MongoDB ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;

/// Extractor for ObjectId path parameters.
///
/// Rejects anything that is not a 24-character hex ObjectId with a 400
/// before the handler runs, so malformed ids never reach the database.
///
/// ```ignore
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_character(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("Character ID: {}", id)
/// }
///
/// let app = Router::new().route("/characters/{id}", get(get_character));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        ObjectId::parse_str(&id)
            .map(ObjectIdPath)
            .map_err(|_| AppError::InvalidObjectId(id).into_response())
    }
}
