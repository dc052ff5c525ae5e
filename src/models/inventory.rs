// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{log::LogEntry, validate_not_negative, validate_tank_id, zone::Zone};

// --- Tanque no pátio (tabela 'inventory') ---
// Uma linha por tanque presente. Substituída a cada entrada, apagada na saída.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tank {
    #[schema(example = "TNKU1234567")]
    pub id: String,
    #[schema(example = "ACETONE")]
    pub content: String,
    #[schema(example = "Z-01")]
    pub zone_id: String,
    pub slot: Option<String>,
    /// Peso líquido (kg).
    pub weight: Decimal,
    pub remark: String,
    pub arrived_at: DateTime<Utc>,
}

// --- Cadastro do tanque (tabela 'registry') ---
// Guarda a tara e as últimas pesagens para pré-preencher a próxima entrada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub id: String,
    #[serde(rename = "empty")]
    pub empty_weight: Option<Decimal>,
    pub content: String,
    pub last_total: Option<Decimal>,
    pub last_head: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

// Tudo o que o painel precisa numa leitura só
#[derive(Debug, Serialize, ToSchema)]
pub struct Snapshot {
    pub zones: Vec<Zone>,
    pub inventory: Vec<Tank>,
    pub logs: Vec<LogEntry>,
    pub registry: Vec<RegistryItem>,
}

// --- Ficha do tanque (consulta pelo número) ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TankProfile {
    pub id: String,
    pub empty: Option<Decimal>,
    pub content: String,
    pub last_net: Option<Decimal>,
    pub last_total: Option<Decimal>,
    pub last_head: Option<Decimal>,
    /// Preenchidos só quando o tanque está no pátio.
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
    pub slot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HistoryPoint {
    #[schema(example = "2025-03-01")]
    pub date: String,
    pub net: Decimal,
    pub action: crate::models::log::LogAction,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TankProfileResponse {
    pub tank: TankProfile,
    pub history: Vec<HistoryPoint>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateInResponse {
    pub status: &'static str,
    pub message: String,
    pub action: crate::models::log::LogAction,
    pub net_weight: Decimal,
    pub tank: Tank,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GateOutResponse {
    pub status: &'static str,
    pub message: String,
    pub log: LogEntry,
}

// --- Formulário da portaria ---
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GateInPayload {
    #[validate(custom(function = "validate_tank_id"))]
    #[schema(example = "TNKU1234567")]
    pub tank_id: String,
    #[validate(length(max = 128, message = "validation.text_too_long"))]
    #[serde(default)]
    pub content: String,
    #[validate(length(min = 1, message = "validation.zone_id_required"))]
    #[schema(example = "Z-01")]
    pub zone_id: String,
    #[validate(length(max = 64, message = "validation.text_too_long"))]
    pub slot: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 28000)]
    pub total_weight: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 0)]
    pub head_weight: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 3500)]
    pub empty_weight: Option<Decimal>,
    #[validate(length(max = 256, message = "validation.text_too_long"))]
    pub remark: Option<String>,
    /// Horário local do pátio ("YYYY-MM-DD HH:MM"). Vazio = agora.
    #[schema(example = "2025-03-01 08:30")]
    pub arrived_at: Option<String>,
}

// --- Manutenção do cadastro (tela de pesagem) ---
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegistryPayload {
    #[validate(custom(function = "validate_not_negative"))]
    pub empty: Option<Decimal>,
    #[validate(length(max = 128, message = "validation.text_too_long"))]
    #[serde(default)]
    pub content: String,
    #[validate(custom(function = "validate_not_negative"))]
    pub total: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub head: Option<Decimal>,
    #[validate(length(max = 256, message = "validation.text_too_long"))]
    pub remark: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistryUpdatedResponse {
    pub status: &'static str,
    pub message: String,
    pub registry: RegistryItem,
    /// Presente quando o tanque estava no pátio e o histórico ganhou uma linha 更新.
    pub log: Option<LogEntry>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Limita a listagem a uma zona.
    pub zone_id: Option<String>,
}
