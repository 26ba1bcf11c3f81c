//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::repository::RepositoryError;
use crate::validation::FieldErrors;

/// Category of failure, inspected by callers instead of error identity
///
/// The kind is serializable so it can travel inside an RPC or HTTP error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request body could not be decoded
    BadRequest,
    /// A point lookup matched no record
    NotFound,
    /// One or more request fields broke a validation rule
    ValidationFailed,
    /// The store rejected a write as a duplicate
    Duplicate,
    /// Store connectivity, row mapping or any other unrecoverable failure
    Execution,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::Duplicate => write!(f, "duplicate"),
            Self::Execution => write!(f, "execution"),
        }
    }
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Duplicate => StatusCode::CONFLICT,
            Self::Execution => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request body was malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request failed validation; carries every failing field
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// Structured repository error
    #[error("{0}")]
    Repository(RepositoryError),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl Error {
    /// The category this error belongs to
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Validation(_) => ErrorKind::ValidationFailed,
            Self::Repository(e) => e.kind,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => ErrorKind::Execution,
        }
    }
}

/// Body detail: either a plain message or a field to message map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Human-readable message
    Message(String),
    /// Per-field validation messages
    Fields(FieldErrors),
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error detail
    pub error: ErrorDetail,
}

impl ErrorResponse {
    /// Error response with a plain message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail::Message(message.into()),
        }
    }

    /// Error response listing failing fields
    pub fn fields(fields: FieldErrors) -> Self {
        Self {
            error: ErrorDetail::Fields(fields),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            ErrorDetail::Message(m) => write!(f, "{m}"),
            ErrorDetail::Fields(fields) => write!(f, "{} invalid field(s)", fields.len()),
        }
    }
}

const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
const DUPLICATE_MESSAGE: &str = "a record with the same values already exists";
const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status_code();

        let body = match self {
            Error::BadRequest(message) => ErrorResponse::message(message),
            Error::Validation(fields) => {
                tracing::debug!(fields = ?fields, "Rejected request with validation errors");
                ErrorResponse::fields(fields)
            }
            Error::Repository(ref e) if e.kind == ErrorKind::NotFound => {
                tracing::debug!(entity_id = ?e.entity_id, "{}", e);
                ErrorResponse::message(NOT_FOUND_MESSAGE)
            }
            Error::Repository(ref e) if e.kind == ErrorKind::Duplicate => {
                tracing::warn!(operation = %e.operation, "{}", e);
                ErrorResponse::message(DUPLICATE_MESSAGE)
            }
            Error::Repository(ref e) => {
                // Full detail stays in the server log
                tracing::error!(
                    operation = %e.operation,
                    kind = %e.kind,
                    "Repository error: {}", e.message
                );
                ErrorResponse::message(SERVER_ERROR_MESSAGE)
            }
            other => {
                tracing::error!("{}", other);
                ErrorResponse::message(SERVER_ERROR_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        Error::Repository(err)
    }
}
