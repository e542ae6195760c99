//! Type-safe error codes for API responses.
//!
//! Each code carries a SCREAMING_SNAKE_CASE identifier for clients and an
//! integer for logs and dashboards.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body failed schema validation
    ValidationError,

    /// Path parameter is not a valid MongoDB ObjectId
    InvalidObjectId,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Generic malformed request (e.g. missing query parameter)
    BadRequest,

    // Database errors (2000-2999)
    /// Command rejected by the server
    DatabaseCommand,

    /// Network I/O with the server failed
    DatabaseIo,

    /// No suitable server could be selected before the timeout
    DatabaseServerSelection,

    /// A write was rejected by the server
    DatabaseWrite,

    /// A stored document could not be decoded
    DatabaseDecode,

    /// A document could not be encoded for the server
    DatabaseEncode,

    /// Any other driver error
    DatabaseUnhandled,
}

impl ErrorCode {
    /// String representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidObjectId => "INVALID_OBJECT_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::DatabaseCommand => "DATABASE_COMMAND",
            Self::DatabaseIo => "DATABASE_IO",
            Self::DatabaseServerSelection => "DATABASE_SERVER_SELECTION",
            Self::DatabaseWrite => "DATABASE_WRITE",
            Self::DatabaseDecode => "DATABASE_DECODE",
            Self::DatabaseEncode => "DATABASE_ENCODE",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidObjectId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::BadRequest => 1006,

            Self::DatabaseCommand => 2003,
            Self::DatabaseIo => 2004,
            Self::DatabaseServerSelection => 2005,
            Self::DatabaseWrite => 2006,
            Self::DatabaseDecode => 2010,
            Self::DatabaseEncode => 2011,
            Self::DatabaseUnhandled => 2099,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
