use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    QueryParams, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestMalformedResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::UserResult;
use crate::filter::{UserFilter, UserSpec};
use crate::models::{
    CreateUser, Page, PageRequest, ProfileType, Role, RoleType, UpdatePassword, UpdateProfile,
    UpdateRole, UpdateStatus, User, UserStatus,
};
use crate::repository::{RoleRepository, UserRepository};
use crate::service::UserService;

pub const TAG: &str = "usuarios";

/// OpenAPI documentation for the user endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        update_password,
        update_status,
        update_role,
        delete_user,
    ),
    components(
        schemas(
            User,
            Role,
            RoleType,
            ProfileType,
            UserStatus,
            CreateUser,
            UpdateProfile,
            UpdatePassword,
            UpdateStatus,
            UpdateRole,
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestMalformedResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = TAG, description = "Cadastro e manutenção de usuários")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R>(service: UserService<R>) -> Router
where
    R: UserRepository + RoleRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{usuarioId}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/{usuarioId}/senha", put(update_password))
        .route("/{usuarioId}/status", put(update_status))
        .route("/{usuarioId}/role", put(update_role))
        .with_state(shared_service)
}

/// List users matching the filters, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(UserFilter, PageRequest),
    responses(
        (status = 200, description = "Page of users", body = Page<User>),
        (status = 400, response = BadRequestMalformedResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_users<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(filter): QueryParams<UserFilter>,
    QueryParams(page): QueryParams<PageRequest>,
) -> UserResult<Json<Page<User>>> {
    let spec = UserSpec::from(&filter);
    let users = service.find_all(&spec, page).await?;
    Ok(Json(users))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_user<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{usuarioId}",
    tag = TAG,
    params(("usuarioId" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn get_user<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<User>> {
    let user = service.find_by_id(id).await?;
    Ok(Json(user))
}

/// Change the user name
#[utoipa::path(
    put,
    path = "/{usuarioId}",
    tag = TAG,
    params(("usuarioId" = Uuid, Path, description = "User id")),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_user<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProfile>,
) -> UserResult<Json<User>> {
    let user = service.find_by_id(id).await?;
    let user = service.update_profile(user, input).await?;
    Ok(Json(user))
}

/// Change the password; `senhaAntiga` must match the current one
#[utoipa::path(
    put,
    path = "/{usuarioId}/senha",
    tag = TAG,
    params(("usuarioId" = Uuid, Path, description = "User id")),
    request_body = UpdatePassword,
    responses(
        (status = 200, description = "Password updated", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_password<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdatePassword>,
) -> UserResult<Json<User>> {
    let user = service.find_by_id(id).await?;
    let user = service.update_password(user, input).await?;
    Ok(Json(user))
}

/// Change the account status
#[utoipa::path(
    put,
    path = "/{usuarioId}/status",
    tag = TAG,
    params(("usuarioId" = Uuid, Path, description = "User id")),
    request_body = UpdateStatus,
    responses(
        (status = 200, description = "Status updated", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_status<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateStatus>,
) -> UserResult<Json<User>> {
    let user = service.find_by_id(id).await?;
    let user = service.update_status(user, input).await?;
    Ok(Json(user))
}

/// Grant a role to the user
#[utoipa::path(
    put,
    path = "/{usuarioId}/role",
    tag = TAG,
    params(("usuarioId" = Uuid, Path, description = "User id")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role granted", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn update_role<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRole>,
) -> UserResult<Json<User>> {
    let user = service.find_by_id(id).await?;
    let user = service.update_role(user, input).await?;
    Ok(Json(user))
}

/// Delete a user and return the removed record
#[utoipa::path(
    delete,
    path = "/{usuarioId}",
    tag = TAG,
    params(("usuarioId" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = User),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn delete_user<R: UserRepository + RoleRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<User>> {
    let user = service.find_by_id(id).await?;
    let user = service.delete(user).await?;
    Ok(Json(user))
}
