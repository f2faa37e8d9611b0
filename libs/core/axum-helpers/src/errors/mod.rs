pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{ConnAcquireErr, DbErr};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Field name → first violation message for that field.
pub type FieldErrors = BTreeMap<String, String>;

/// Body of every error response.
///
/// `errors` is only populated for validation failures and serializes as
/// `null` otherwise.
///
/// ```json
/// {
///   "status": 400,
///   "message": "ERRO DE VALIDAÇÃO",
///   "errors": { "email": "O campo deve ser preenhido no formato de E-mail" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Human-readable error message
    pub message: String,
    /// Per-field validation messages
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            errors: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Every variant maps to exactly one status code. The translation logs the
/// failure with an `error_code` field before building the body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    /// Violations detected outside the validator, such as uniqueness checks.
    #[error("Field validation error: {0:?}")]
    FieldViolations(FieldErrors),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Single-field violation, e.g. a duplicate e-mail.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), message.into());
        AppError::FieldViolations(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors, code) = match self {
            AppError::ValidationError(e) => {
                let errors = field_errors(&e);
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    fields = ?errors.keys().collect::<Vec<_>>(),
                    "ERRO DE VALIDAÇÃO"
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(errors),
                    ErrorCode::ValidationError,
                )
            }
            AppError::FieldViolations(errors) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    fields = ?errors.keys().collect::<Vec<_>>(),
                    "ERRO DE VALIDAÇÃO"
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(errors),
                    ErrorCode::ValidationError,
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::MalformedBody.code(),
                    "Corpo da requisição ausente ou mal formatado: {}",
                    e.body_text()
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::MalformedBody.default_message().to_string(),
                    None,
                    ErrorCode::MalformedBody,
                )
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::MalformedQuery.code(),
                    "Query string rejected: {}",
                    e.body_text()
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::MalformedQuery.default_message().to_string(),
                    None,
                    ErrorCode::MalformedQuery,
                )
            }
            AppError::PathExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidUuid.code(),
                    "Path parameter rejected: {}",
                    e.body_text()
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidUuid.default_message().to_string(),
                    None,
                    ErrorCode::InvalidUuid,
                )
            }
            AppError::UuidError(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidUuid.code(),
                    "UUID error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidUuid.default_message().to_string(),
                    None,
                    ErrorCode::InvalidUuid,
                )
            }
            AppError::Database(e) => map_db_error(&e),
            AppError::NotFound(msg) => {
                tracing::error!(error_code = ErrorCode::NotFound.code(), "ERRO: {}", msg);
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        tracing::debug!(error = %code, status = status.as_u16(), "error response");

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

/// Flattens validator output into one message per field.
///
/// Keys are reported in lowerCamelCase so they match the JSON field names
/// even when the Rust field is snake_case.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (to_camel_case(field), message)
            })
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Maps a SeaORM error to status, message and code.
///
/// Driver details stay in the log; clients only see the generic message.
fn map_db_error(error: &DbErr) -> (StatusCode, String, Option<FieldErrors>, ErrorCode) {
    let code = match error {
        DbErr::RecordNotFound(_) => {
            tracing::info!(
                error_code = ErrorCode::DatabaseNotFound.code(),
                "Database record not found: {}",
                error
            );
            return (
                StatusCode::NOT_FOUND,
                ErrorCode::DatabaseNotFound.default_message().to_string(),
                None,
                ErrorCode::DatabaseNotFound,
            );
        }
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            tracing::warn!(
                error_code = ErrorCode::DatabasePoolTimeout.code(),
                "Database connection pool timed out"
            );
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::DatabasePoolTimeout.default_message().to_string(),
                None,
                ErrorCode::DatabasePoolTimeout,
            );
        }
        DbErr::ConnectionAcquire(_) => ErrorCode::DatabasePoolClosed,
        DbErr::Conn(_) => ErrorCode::DatabaseConnection,
        DbErr::Exec(_) | DbErr::Query(_) => ErrorCode::DatabaseError,
        _ => ErrorCode::DatabaseUnhandled,
    };

    tracing::error!(error_code = code.code(), "Database error: {:?}", error);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code.default_message().to_string(),
        None,
        code,
    )
}

/// Builds an error response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    tracing::debug!(error_code = error_code.code(), "{}", message);
    (status, Json(ErrorResponse::new(status, message))).into_response()
}
