// src/handlers/logs.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{RequireRole, SuperUser},
    },
    models::{
        log::{LogPage, LogQuery, LogUpdatedResponse, UpdateLogPayload},
        response::{MessageResponse, STATUS_SUCCESS},
    },
};

// GET /api/logs
#[utoipa::path(
    get,
    path = "/api/logs",
    tag = "Logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Histórico filtrado e paginado", body = LogPage),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<LogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .log_service
        .list(query.q.as_deref(), query.page, query.per_page)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/logs/export
#[utoipa::path(
    get,
    path = "/api/logs/export",
    tag = "Logs",
    params(("q" = Option<String>, Query, description = "Mesmo filtro da listagem")),
    responses(
        (status = 200, description = "CSV (UTF-8 com BOM)", body = String, content_type = "text/csv"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn export_logs(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<LogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (filename, body) = app_state
        .log_service
        .export(query.q.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

// PUT /api/logs/{id}
#[utoipa::path(
    put,
    path = "/api/logs/{id}",
    tag = "Logs",
    request_body = UpdateLogPayload,
    params(("id" = i64, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Registro editado", body = LogUpdatedResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Apenas super usuário"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_log(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateLogPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let log = app_state
        .log_service
        .update(id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .i18n_store
        .t(&locale, "logs.updated", &[("id", id.to_string())]);

    Ok((
        StatusCode::OK,
        Json(LogUpdatedResponse {
            status: STATUS_SUCCESS,
            message,
            log,
        }),
    ))
}

// DELETE /api/logs/{id}
#[utoipa::path(
    delete,
    path = "/api/logs/{id}",
    tag = "Logs",
    params(("id" = i64, Path, description = "ID do registro")),
    responses(
        (status = 200, description = "Registro apagado", body = MessageResponse),
        (status = 403, description = "Apenas super usuário"),
        (status = 404, description = "Registro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_log(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<SuperUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .log_service
        .delete(id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .i18n_store
        .t(&locale, "logs.deleted", &[("id", id.to_string())]);
    Ok((StatusCode::OK, Json(MessageResponse::success(message))))
}
