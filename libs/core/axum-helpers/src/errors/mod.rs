pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::error::{Error as MongoError, ErrorKind};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Character not found with id: 65f0c0ffee0ddba11ad5eed5",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details (e.g. schema violations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Driver failure. `message` is what the client sees; `source` is only logged.
    #[error("{message}: {source}")]
    Database {
        message: String,
        #[source]
        source: MongoError,
    },

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    /// Validation failure with an explicit client-facing message.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: ValidationErrors,
    },

    #[error("Invalid ObjectId: {0}")]
    InvalidObjectId(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::Database { message, source } => {
                let (status, code) = classify_mongo_error(&source);
                tracing::error!(
                    error_code = code.code(),
                    error = %source,
                    "{}",
                    message
                );
                (status, message, None, code)
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), e.body_text(), None, ErrorCode::JsonExtraction)
            }
            AppError::Validation { message, errors } => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    errors
                );
                (
                    StatusCode::BAD_REQUEST,
                    message,
                    Some(validation_details(&errors)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::InvalidObjectId(id) => {
                tracing::info!(error_code = ErrorCode::InvalidObjectId.code(), id = %id, "Invalid id");
                (
                    StatusCode::BAD_REQUEST,
                    format!("Invalid id: {}", id),
                    None,
                    ErrorCode::InvalidObjectId,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::BadRequest)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Pick an error code for a driver error.
///
/// Every driver failure is a server-side problem from the client's point of
/// view, so the status is always 500; the code tells operators which kind.
fn classify_mongo_error(error: &MongoError) -> (StatusCode, ErrorCode) {
    let code = match error.kind.as_ref() {
        ErrorKind::Command(_) => ErrorCode::DatabaseCommand,
        ErrorKind::Io(_) => ErrorCode::DatabaseIo,
        ErrorKind::ServerSelection { .. } => ErrorCode::DatabaseServerSelection,
        ErrorKind::Write(_) => ErrorCode::DatabaseWrite,
        ErrorKind::BsonDeserialization(_) => ErrorCode::DatabaseDecode,
        ErrorKind::BsonSerialization(_) => ErrorCode::DatabaseEncode,
        _ => ErrorCode::DatabaseUnhandled,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, code)
}

/// Flatten validator errors into `{"errors": [{field, code, message, params}]}`.
///
/// One entry per violation, ordered by field name so responses are stable.
pub fn validation_details(errors: &ValidationErrors) -> serde_json::Value {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let list: Vec<serde_json::Value> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                serde_json::json!({
                    "field": field,
                    "code": err.code,
                    "message": err.message,
                    "params": err.params,
                })
            })
        })
        .collect();

    serde_json::json!({ "errors": list })
}

/// Helper function to create error responses.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_validation_details_lists_every_violation() {
        let mut errors = ValidationErrors::new();
        errors.add("nickname", ValidationError::new("required"));
        errors.add("additionalProperties", ValidationError::new("additional_properties"));
        errors.add("additionalProperties", ValidationError::new("additional_properties"));

        let details = validation_details(&errors);
        let list = details["errors"].as_array().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0]["field"], "additionalProperties");
        assert_eq!(list[2]["field"], "nickname");
        assert_eq!(list[2]["code"], "required");
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_object_id_is_bad_request() {
        let response = AppError::InvalidObjectId("not-an-id".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let mut errors = ValidationErrors::new();
        errors.add("realName", ValidationError::new("type"));
        let response = AppError::Validation {
            message: "The submitted data is not valid".to_string(),
            errors,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_driver_errors_are_internal() {
        let source = MongoError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ));
        let (status, code) = classify_mongo_error(&source);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, ErrorCode::DatabaseIo);

        let response = AppError::Database {
            message: "Failed to fetch characters".to_string(),
            source,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
