//! JSON body extractor that runs `validator` rules before the handler.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body as `T` and validates it.
///
/// A body that is missing, not JSON or of the wrong shape becomes
/// [`AppError::JsonExtractorRejection`]; rule violations become
/// [`AppError::ValidationError`] with one message per field.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct Rename {
///     #[serde(default)]
///     #[validate(length(min = 5, max = 50))]
///     nome: String,
/// }
///
/// async fn rename(ValidatedJson(body): ValidatedJson<Rename>) -> String {
///     body.nome
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        response::IntoResponse,
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Rename {
        #[serde(default)]
        #[validate(length(min = 5, max = 50, message = "tamanho inválido"))]
        nome: String,
    }

    async fn rename(ValidatedJson(body): ValidatedJson<Rename>) -> impl IntoResponse {
        body.nome
    }

    async fn send(body: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(rename));
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, _) = send(r#"{"nome":"joaosilva"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_field_is_field_violation() {
        let (status, json) = send("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "ERRO DE VALIDAÇÃO");
        assert_eq!(json["errors"]["nome"], "tamanho inválido");
    }

    #[tokio::test]
    async fn test_malformed_json_has_no_field_map() {
        let (status, json) = send("{nome:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], 400);
        assert!(json["errors"].is_null());
    }
}
