use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

pub const USER_NOT_FOUND: &str = "ERRO, USUARIO NÃO ENCONTRADO!";
pub const ROLE_NOT_FOUND: &str = "ERROR: ROLE NÃO EXISTENTE.";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("ERRO, USUARIO NÃO ENCONTRADO! ({0})")]
    NotFound(Uuid),

    #[error("ERROR: ROLE NÃO EXISTENTE.")]
    RoleNotFound,

    /// A single rejected input field, e.g. a duplicate e-mail.
    #[error("{field}: {message}")]
    Field { field: String, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::Field {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(USER_NOT_FOUND.to_string()),
            UserError::RoleNotFound => AppError::NotFound(ROLE_NOT_FOUND.to_string()),
            UserError::Field { field, message } => AppError::field(field, message),
            UserError::Validation(errors) => AppError::ValidationError(errors),
            UserError::PasswordHash(msg) => {
                AppError::InternalServerError(format!("password hashing failed: {msg}"))
            }
            UserError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::ErrorResponse;
    use http_body_util::BodyExt;

    async fn translate(err: UserError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let (status, body) = translate(UserError::NotFound(Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, USER_NOT_FOUND);
        assert!(body.errors.is_none());
    }

    #[tokio::test]
    async fn test_role_not_found_is_404() {
        let (status, body) = translate(UserError::RoleNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, ROLE_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_field_violation_is_validation_error() {
        let (status, body) = translate(UserError::field("email", "E-mail já cadastrado!")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "ERRO DE VALIDAÇÃO");
        assert_eq!(body.errors.unwrap()["email"], "E-mail já cadastrado!");
    }

    #[tokio::test]
    async fn test_internal_errors_are_generic() {
        let (status, body) = translate(UserError::PasswordHash("salt".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("salt"));

        let (status, _) = translate(UserError::Database(DbErr::Custom("x".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
