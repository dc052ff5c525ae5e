// src/handlers/zones.rs

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
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{Admin, RequireRole},
    },
    models::{
        response::{MessageResponse, STATUS_SUCCESS},
        zone::{SaveZonesPayload, SaveZonesResponse, SlotStatus, Zone},
    },
};

// GET /api/zones
#[utoipa::path(
    get,
    path = "/api/zones",
    tag = "Zones",
    responses(
        (status = 200, description = "Zonas configuradas", body = Vec<Zone>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_zones(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let zones = app_state
        .zone_service
        .list()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(zones)))
}

// PUT /api/zones
#[utoipa::path(
    put,
    path = "/api/zones",
    tag = "Zones",
    request_body = SaveZonesPayload,
    responses(
        (status = 200, description = "Configuração salva", body = SaveZonesResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Requer papel admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_zones(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<Admin>,
    Json(payload): Json<SaveZonesPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let zones = app_state
        .zone_service
        .save_all(&payload.zones)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::info!(user = %guard.user.id, "Configuração de zonas alterada");
    let message = app_state.i18n_store.t(&locale, "zones.saved", &[]);

    Ok((
        StatusCode::OK,
        Json(SaveZonesResponse {
            status: STATUS_SUCCESS,
            message,
            zones,
        }),
    ))
}

// DELETE /api/zones/{id}
#[utoipa::path(
    delete,
    path = "/api/zones/{id}",
    tag = "Zones",
    params(("id" = String, Path, description = "ID da zona")),
    responses(
        (status = 200, description = "Zona apagada", body = MessageResponse),
        (status = 403, description = "Requer papel admin"),
        (status = 404, description = "Zona inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_zone(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<Admin>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .zone_service
        .delete(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state.i18n_store.t(&locale, "zones.deleted", &[("id", id)]);
    Ok((StatusCode::OK, Json(MessageResponse::success(message))))
}

// GET /api/zones/{id}/slots
#[utoipa::path(
    get,
    path = "/api/zones/{id}/slots",
    tag = "Zones",
    params(("id" = String, Path, description = "ID da zona")),
    responses(
        (status = 200, description = "Posições da zona e quem ocupa cada uma", body = Vec<SlotStatus>),
        (status = 404, description = "Zona inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_slots(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let slots = app_state
        .zone_service
        .slots(&id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(slots)))
}
