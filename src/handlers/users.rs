// src/handlers/users.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{RequireRole, SuperUser},
    },
    models::{
        auth::{CreateUserPayload, UpdatePermissionPayload, User, UserResponse},
        response::STATUS_SUCCESS,
    },
};

// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Todos os usuários", body = Vec<User>),
        (status = 403, description = "Apenas super usuário")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperUser>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .user_service
        .list_users()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(users)))
}

// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = UserResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas super usuário"),
        (status = 409, description = "Conta já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<SuperUser>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let user = app_state
        .user_service
        .create_user(
            &payload.id,
            &payload.name,
            &payload.password,
            payload.role,
            payload.is_super,
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(by = %guard.user.id, user = %user.id, "Usuário cadastrado pelo painel");
    let message = app_state
        .i18n_store
        .t(&locale, "users.created", &[("id", user.id.clone())]);

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            status: STATUS_SUCCESS,
            message,
            user,
        }),
    ))
}

// PUT /api/users/{id}/permission
#[utoipa::path(
    put,
    path = "/api/users/{id}/permission",
    tag = "Users",
    request_body = UpdatePermissionPayload,
    params(("id" = String, Path, description = "Conta do usuário")),
    responses(
        (status = 200, description = "Permissões alteradas", body = UserResponse),
        (status = 403, description = "Apenas super usuário"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_permission(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePermissionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .user_service
        .update_permission(&id, payload.role, payload.is_super)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .i18n_store
        .t(&locale, "users.updated", &[("id", user.id.clone())]);

    Ok((
        StatusCode::OK,
        Json(UserResponse {
            status: STATUS_SUCCESS,
            message,
            user,
        }),
    ))
}
