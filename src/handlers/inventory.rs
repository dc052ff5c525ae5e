// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
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
        rbac::{Admin, RequireRole},
    },
    models::{
        inventory::{
            InventoryQuery, RegistryUpdatedResponse, Snapshot, Tank, TankProfileResponse,
            UpdateRegistryPayload,
        },
        response::STATUS_SUCCESS,
    },
    services::tank_service::RegistryUpdate,
};

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    params(InventoryQuery),
    responses(
        (status = 200, description = "Tanques no pátio, por ordem de chegada", body = Vec<Tank>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_inventory(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Query(query): Query<InventoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let tanks = app_state
        .tank_service
        .list_inventory(query.zone_id.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(tanks)))
}

// GET /api/snapshot
#[utoipa::path(
    get,
    path = "/api/snapshot",
    tag = "Inventory",
    responses(
        (status = 200, description = "Zonas, inventário, histórico e cadastro numa leitura só", body = Snapshot),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_snapshot(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = app_state
        .tank_service
        .snapshot()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(snapshot)))
}

// GET /api/tanks/{id}
#[utoipa::path(
    get,
    path = "/api/tanks/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "Número do tanque")),
    responses(
        (status = 200, description = "Ficha e histórico de pesagens", body = TankProfileResponse),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_tank_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .tank_service
        .profile(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(profile)))
}

// PUT /api/registry/{id}
#[utoipa::path(
    put,
    path = "/api/registry/{id}",
    tag = "Inventory",
    request_body = UpdateRegistryPayload,
    params(("id" = String, Path, description = "Número do tanque")),
    responses(
        (status = 200, description = "Cadastro atualizado", body = RegistryUpdatedResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Requer papel admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_registry(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<Admin>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRegistryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let update = RegistryUpdate {
        empty: payload.empty,
        content: payload.content,
        total: payload.total,
        head: payload.head,
        remark: payload.remark,
    };

    let (registry, log) = app_state
        .tank_service
        .update_registry(&guard.user, &id, update)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state.i18n_store.t(&locale, "registry.updated", &[]);

    Ok((
        StatusCode::OK,
        Json(RegistryUpdatedResponse {
            status: STATUS_SUCCESS,
            message,
            registry,
            log,
        }),
    ))
}
