//! Reusable OpenAPI response types so every route documents the same error body.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "message": "Erro interno do servidor.",
        "errors": null
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "message": "ERRO DE VALIDAÇÃO",
        "errors": {
            "email": "O campo deve ser preenhido no formato de E-mail",
            "nome": "O número máximo de caracteres é 50, e o mínimo é 5."
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Missing or malformed body",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "message": "Erro: O corpo da requisição está ausente ou mal formatado.",
        "errors": null
    })
)]
pub struct BadRequestMalformedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "message": "Erro: O identificador informado não é um UUID válido.",
        "errors": null
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "message": "ERRO, USUARIO NÃO ENCONTRADO!",
        "errors": null
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "status": 503,
        "message": "Banco de dados temporariamente indisponível.",
        "errors": null
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
