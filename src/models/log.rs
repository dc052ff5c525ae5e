// src/models/log.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::validate_not_negative;

// Os rótulos são gravados no banco e devolvidos na API exatamente assim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "log_action")]
pub enum LogAction {
    #[sqlx(rename = "進場")]
    #[serde(rename = "進場")]
    Entry,
    #[sqlx(rename = "出場")]
    #[serde(rename = "出場")]
    Exit,
    #[sqlx(rename = "移區")]
    #[serde(rename = "移區")]
    Transfer,
    #[sqlx(rename = "更新")]
    #[serde(rename = "更新")]
    Update,
}

impl LogAction {
    pub fn label(&self) -> &'static str {
        match self {
            LogAction::Entry => "進場",
            LogAction::Exit => "出場",
            LogAction::Transfer => "移區",
            LogAction::Update => "更新",
        }
    }

    /// Ações que gravam uma pesagem (tudo menos a saída).
    pub fn is_weighing(&self) -> bool {
        !matches!(self, LogAction::Exit)
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// --- Histórico de movimentação (tabela 'logs') ---
// Cópia desnormalizada do tanque no momento da operação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: i64,
    pub logged_at: DateTime<Utc>,
    #[schema(example = "TNKU1234567")]
    pub tank_id: String,
    pub action: LogAction,
    /// Nome da zona na hora da operação.
    pub zone: String,
    pub slot: Option<String>,
    pub user_id: String,
    pub content: String,
    pub weight: Decimal,
    pub total_weight: Option<Decimal>,
    pub head_weight: Option<Decimal>,
    pub empty_weight: Option<Decimal>,
    pub remark: String,
}

// Dados para inserir uma linha nova (o id é gerado pelo banco)
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub logged_at: DateTime<Utc>,
    pub tank_id: String,
    pub action: LogAction,
    pub zone: String,
    pub slot: Option<String>,
    pub user_id: String,
    pub content: String,
    pub weight: Decimal,
    pub total_weight: Option<Decimal>,
    pub head_weight: Option<Decimal>,
    pub empty_weight: Option<Decimal>,
    pub remark: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    /// Busca sem diferenciar maiúsculas em todos os campos exibidos.
    pub q: Option<String>,
    /// Página (começa em 1).
    pub page: Option<usize>,
    /// Linhas por página (padrão 50, máximo 500).
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub items: Vec<LogEntry>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

// Edição manual (só super usuário). Campos ausentes ficam como estão.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogPayload {
    /// Mesmo formato da entrada: "YYYY-MM-DD HH:MM".
    pub logged_at: Option<String>,
    pub action: Option<LogAction>,
    #[validate(length(max = 64, message = "validation.text_too_long"))]
    pub zone: Option<String>,
    #[validate(length(max = 64, message = "validation.text_too_long"))]
    pub slot: Option<String>,
    #[validate(length(max = 128, message = "validation.text_too_long"))]
    pub content: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub weight: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub total_weight: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub head_weight: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub empty_weight: Option<Decimal>,
    #[validate(length(max = 256, message = "validation.text_too_long"))]
    pub remark: Option<String>,
}

// Patch já convertido (horário interpretado no fuso do pátio)
#[derive(Debug, Default, Clone)]
pub struct LogPatch {
    pub logged_at: Option<DateTime<Utc>>,
    pub action: Option<LogAction>,
    pub zone: Option<String>,
    pub slot: Option<String>,
    pub content: Option<String>,
    pub weight: Option<Decimal>,
    pub total_weight: Option<Decimal>,
    pub head_weight: Option<Decimal>,
    pub empty_weight: Option<Decimal>,
    pub remark: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogUpdatedResponse {
    pub status: &'static str,
    pub message: String,
    pub log: LogEntry,
}
