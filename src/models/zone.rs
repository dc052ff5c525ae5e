// src/models/zone.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// --- Zona física do pátio ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[schema(example = "Z-01")]
    pub id: String,
    #[schema(example = "A區")]
    pub name: String,
    /// Quantidade máxima de tanques na zona.
    #[schema(example = 35)]
    pub capacity: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZonePayload {
    #[validate(length(min = 1, max = 32, message = "validation.zone_id_required"))]
    pub id: String,
    #[validate(length(min = 1, max = 64, message = "validation.zone_name_required"))]
    pub name: String,
    #[validate(range(min = 0, max = 10000, message = "validation.capacity_range"))]
    pub capacity: i32,
}

// O formulário de configuração salva todas as zonas de uma vez
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveZonesPayload {
    #[validate(length(min = 1, message = "validation.zones_empty"), nested)]
    pub zones: Vec<ZonePayload>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveZonesResponse {
    pub status: &'static str,
    pub message: String,
    pub zones: Vec<Zone>,
}

// Posição dentro da zona ("A區-1", "A區-2", ...) e quem está nela
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatus {
    pub slot: String,
    pub tank_id: Option<String>,
}
