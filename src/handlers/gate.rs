// src/handlers/gate.rs

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
        rbac::{Operator, RequireRole},
    },
    models::{
        inventory::{GateInPayload, GateInResponse, GateOutResponse},
        response::STATUS_SUCCESS,
    },
    services::gate_service::GateInRequest,
};

impl From<GateInPayload> for GateInRequest {
    fn from(payload: GateInPayload) -> Self {
        Self {
            tank_id: payload.tank_id,
            content: payload.content,
            zone_id: payload.zone_id,
            slot: payload.slot,
            total_weight: payload.total_weight,
            head_weight: payload.head_weight,
            empty_weight: payload.empty_weight,
            remark: payload.remark,
            arrived_at: payload.arrived_at,
        }
    }
}

// POST /api/gate/in
#[utoipa::path(
    post,
    path = "/api/gate/in",
    tag = "Gate",
    request_body = GateInPayload,
    responses(
        (status = 200, description = "Entrada, atualização ou troca de zona registrada", body = GateInResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Requer papel op ou admin"),
        (status = 404, description = "Zona inexistente"),
        (status = 409, description = "Zona lotada (quando o limite está ativo)")
    ),
    security(("api_jwt" = []))
)]
pub async fn gate_in(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<Operator>,
    Json(payload): Json<GateInPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = app_state
        .gate_service
        .gate_in(&guard.user, payload.into())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state.i18n_store.t(
        &locale,
        "gate_in.success",
        &[
            ("id", outcome.tank.id.clone()),
            ("action", outcome.action.to_string()),
        ],
    );

    Ok((
        StatusCode::OK,
        Json(GateInResponse {
            status: STATUS_SUCCESS,
            message,
            action: outcome.action,
            net_weight: outcome.net_weight,
            tank: outcome.tank,
        }),
    ))
}

// DELETE /api/inventory/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Gate",
    params(("id" = String, Path, description = "Número do tanque")),
    responses(
        (status = 200, description = "Tanque saiu do pátio", body = GateOutResponse),
        (status = 403, description = "Requer papel op ou admin"),
        (status = 404, description = "Tanque não está no pátio")
    ),
    security(("api_jwt" = []))
)]
pub async fn gate_out(
    State(app_state): State<AppState>,
    locale: Locale,
    guard: RequireRole<Operator>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let log = app_state
        .gate_service
        .gate_out(&guard.user, &id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .i18n_store
        .t(&locale, "gate_out.success", &[("id", log.tank_id.clone())]);

    Ok((
        StatusCode::OK,
        Json(GateOutResponse {
            status: STATUS_SUCCESS,
            message,
            log,
        }),
    ))
}
