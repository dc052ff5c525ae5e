// src/services/log_service.rs

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;

use crate::{
    common::{
        clock::{format_local, parse_local_time},
        error::AppError,
    },
    db::LogRepository,
    models::log::{LogEntry, LogPage, LogPatch, UpdateLogPayload},
};

pub const DEFAULT_PER_PAGE: usize = 50;
pub const MAX_PER_PAGE: usize = 500;

const DISPLAY_TIME: &str = "%Y-%m-%d %H:%M";

const CSV_HEADER: [&str; 12] = [
    "時間 (Time)",
    "槽號 (Tank ID)",
    "動作 (Action)",
    "內容物 (Content)",
    "區域 (Zone)",
    "儲位 (Slot)",
    "淨重 (Net)",
    "總重 (Total)",
    "車頭 (Head)",
    "空櫃 (Empty)",
    "備註 (Remark)",
    "人員 (User)",
];

// Excel só reconhece UTF-8 com BOM
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Clone)]
pub struct LogService {
    log_repo: LogRepository,
    yard_offset: FixedOffset,
}

impl LogService {
    pub fn new(log_repo: LogRepository, yard_offset: FixedOffset) -> Self {
        Self { log_repo, yard_offset }
    }

    pub async fn list(
        &self,
        q: Option<&str>,
        page: Option<usize>,
        per_page: Option<usize>,
    ) -> Result<LogPage, AppError> {
        let logs = self.log_repo.list_all().await?;
        let filtered = filter_logs(logs, q, self.yard_offset);
        Ok(paginate(filtered, page, per_page))
    }

    /// Gera o CSV filtrado. Devolve (nome do arquivo, bytes).
    pub async fn export(&self, q: Option<&str>) -> Result<(String, Vec<u8>), AppError> {
        let logs = self.log_repo.list_all().await?;
        let filtered = filter_logs(logs, q, self.yard_offset);
        let body = logs_to_csv(&filtered, self.yard_offset)?;

        tracing::info!(rows = filtered.len(), "Histórico exportado");
        Ok((export_filename(Utc::now(), self.yard_offset), body))
    }

    pub async fn update(&self, id: i64, payload: UpdateLogPayload) -> Result<LogEntry, AppError> {
        let patch = self.to_patch(payload)?;
        let log = self
            .log_repo
            .update(id, &patch)
            .await?
            .ok_or(AppError::LogNotFound(id))?;

        tracing::info!(log = id, tank = %log.tank_id, "Registro de histórico editado");
        Ok(log)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.log_repo.delete(id).await? {
            return Err(AppError::LogNotFound(id));
        }
        tracing::info!(log = id, "Registro de histórico apagado");
        Ok(())
    }

    fn to_patch(&self, payload: UpdateLogPayload) -> Result<LogPatch, AppError> {
        let logged_at = payload
            .logged_at
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_local_time(raw, self.yard_offset))
            .transpose()?;

        Ok(LogPatch {
            logged_at,
            action: payload.action,
            zone: payload.zone.map(|v| v.trim().to_string()),
            slot: payload.slot.map(|v| v.trim().to_string()),
            content: payload.content.map(|v| v.trim().to_string()),
            weight: payload.weight,
            total_weight: payload.total_weight,
            head_weight: payload.head_weight,
            empty_weight: payload.empty_weight,
            remark: payload.remark.map(|v| v.trim().to_string()),
        })
    }
}

// ---
// Filtro, ordenação e paginação
// ---

/// Texto exibido na tela para uma linha; é nele que a busca procura.
pub fn search_text(log: &LogEntry, offset: FixedOffset) -> String {
    format!(
        "{} {} {} {} {} {} {} {}",
        format_local(log.logged_at, offset, DISPLAY_TIME),
        log.tank_id,
        log.action,
        log.zone,
        log.slot.as_deref().unwrap_or_default(),
        log.content,
        log.user_id,
        log.remark,
    )
}

pub fn filter_logs(mut logs: Vec<LogEntry>, q: Option<&str>, offset: FixedOffset) -> Vec<LogEntry> {
    logs.sort_by(|a, b| b.logged_at.cmp(&a.logged_at).then(b.id.cmp(&a.id)));

    let needle = q.map(str::trim).unwrap_or_default().to_lowercase();
    if needle.is_empty() {
        return logs;
    }

    logs.into_iter()
        .filter(|log| search_text(log, offset).to_lowercase().contains(&needle))
        .collect()
}

pub fn paginate(items: Vec<LogEntry>, page: Option<usize>, per_page: Option<usize>) -> LogPage {
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let page = page.unwrap_or(1).max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    LogPage {
        items,
        total,
        page,
        per_page,
        total_pages,
    }
}

// ---
// Exportação CSV
// ---

pub fn logs_to_csv(logs: &[LogEntry], offset: FixedOffset) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| anyhow::anyhow!("Falha ao escrever o cabeçalho do CSV: {}", e))?;

    for log in logs {
        writer
            .write_record([
                format_local(log.logged_at, offset, DISPLAY_TIME),
                log.tank_id.clone(),
                log.action.to_string(),
                log.content.clone(),
                log.zone.clone(),
                log.slot.clone().unwrap_or_default(),
                log.weight.to_string(),
                weight_or_zero(log.total_weight),
                weight_or_zero(log.head_weight),
                weight_or_zero(log.empty_weight),
                log.remark.clone(),
                log.user_id.clone(),
            ])
            .map_err(|e| anyhow::anyhow!("Falha ao escrever linha {} do CSV: {}", log.id, e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Falha ao finalizar o CSV: {}", e.error()))?;
    Ok(bytes)
}

pub fn export_filename(now: DateTime<Utc>, offset: FixedOffset) -> String {
    format!("ISO_Logs_{}.csv", format_local(now, offset, "%Y-%m-%d"))
}

fn weight_or_zero(weight: Option<Decimal>) -> String {
    weight.unwrap_or(Decimal::ZERO).to_string()
}
