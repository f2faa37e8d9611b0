//! Error codes attached to every translated failure.
//!
//! The code never reaches the client body; it is recorded as the
//! `error_code` field of the log event emitted while the response is built,
//! so dashboards can group failures without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "ERRO DE VALIDAÇÃO");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// One or more input fields were rejected
    ValidationError,

    /// Path parameter is not a UUID
    InvalidUuid,

    /// Request body missing, not JSON, or of the wrong shape
    MalformedBody,

    /// Query string could not be decoded
    MalformedQuery,

    /// Requested resource was not found
    NotFound,

    /// Route exists but not for this method
    MethodNotAllowed,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    // Database errors (2000-2999)
    /// Database query returned no results
    DatabaseNotFound,

    /// Query or statement failed on the server
    DatabaseError,

    /// Could not reach the database
    DatabaseConnection,

    /// Database connection pool timed out
    DatabasePoolTimeout,

    /// Database connection pool has been closed
    DatabasePoolClosed,

    /// Unhandled database error
    DatabaseUnhandled,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::MalformedBody => "MALFORMED_BODY",
            Self::MalformedQuery => "MALFORMED_QUERY",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabasePoolTimeout => "DATABASE_POOL_TIMEOUT",
            Self::DatabasePoolClosed => "DATABASE_POOL_CLOSED",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
        }
    }

    /// Integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::MalformedBody => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MalformedQuery => 1006,
            Self::MethodNotAllowed => 1007,

            Self::DatabaseNotFound => 2001,
            Self::DatabaseError => 2003,
            Self::DatabaseConnection => 2004,
            Self::DatabasePoolTimeout => 2013,
            Self::DatabasePoolClosed => 2014,
            Self::DatabaseUnhandled => 2099,
        }
    }

    /// Client-facing message used when the error carries none of its own.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "ERRO DE VALIDAÇÃO",
            Self::InvalidUuid => "Erro: O identificador informado não é um UUID válido.",
            Self::MalformedBody => "Erro: O corpo da requisição está ausente ou mal formatado.",
            Self::MalformedQuery => "Erro: Os parâmetros da consulta estão mal formatados.",
            Self::NotFound => "Erro: Recurso não encontrado.",
            Self::MethodNotAllowed => "Erro: Método HTTP não permitido para este recurso.",
            Self::InternalError => "Erro interno do servidor.",
            Self::DatabaseNotFound => "Erro: Registro não encontrado.",
            Self::DatabaseError
            | Self::DatabaseConnection
            | Self::DatabasePoolClosed
            | Self::DatabaseUnhandled => "Erro interno ao acessar o banco de dados.",
            Self::DatabasePoolTimeout => "Banco de dados temporariamente indisponível.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
