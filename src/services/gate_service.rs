// src/services/gate_service.rs

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{clock::parse_local_time, error::AppError},
    db::{InventoryRepository, LogRepository, RegistryRepository, ZoneRepository},
    models::{
        auth::User,
        inventory::Tank,
        log::{LogAction, LogEntry, NewLogEntry},
    },
};

// Dados da portaria já desserializados (ver GateInPayload no handler)
#[derive(Debug, Clone, Default)]
pub struct GateInRequest {
    pub tank_id: String,
    pub content: String,
    pub zone_id: String,
    pub slot: Option<String>,
    pub total_weight: Option<Decimal>,
    pub head_weight: Option<Decimal>,
    pub empty_weight: Option<Decimal>,
    pub remark: Option<String>,
    pub arrived_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GateInOutcome {
    pub action: LogAction,
    pub net_weight: Decimal,
    pub tank: Tank,
    pub log: LogEntry,
}

#[derive(Clone)]
pub struct GateService {
    pool: PgPool,
    zone_repo: ZoneRepository,
    inventory_repo: InventoryRepository,
    registry_repo: RegistryRepository,
    log_repo: LogRepository,
    enforce_capacity: bool,
    yard_offset: FixedOffset,
}

impl GateService {
    pub fn new(
        pool: PgPool,
        zone_repo: ZoneRepository,
        inventory_repo: InventoryRepository,
        registry_repo: RegistryRepository,
        log_repo: LogRepository,
        enforce_capacity: bool,
        yard_offset: FixedOffset,
    ) -> Self {
        Self {
            pool,
            zone_repo,
            inventory_repo,
            registry_repo,
            log_repo,
            enforce_capacity,
            yard_offset,
        }
    }

    /// Entrada pela portaria: classifica, grava o tanque e o histórico numa transação.
    pub async fn gate_in(&self, user: &User, request: GateInRequest) -> Result<GateInOutcome, AppError> {
        let tank_id = require_tank_id(&request.tank_id)?;

        let arrived_at = self.resolve_arrival(request.arrived_at.as_deref())?;
        let net = net_weight(request.total_weight, request.head_weight, request.empty_weight);
        let content = request.content.trim().to_string();
        let remark = request.remark.as_deref().unwrap_or_default().trim().to_string();
        let slot = non_empty(request.slot.as_deref());

        let mut tx = self.pool.begin().await?;

        let zone = self
            .zone_repo
            .find_by_id(&mut *tx, request.zone_id.trim())
            .await?
            .ok_or_else(|| AppError::ZoneNotFound(request.zone_id.trim().to_string()))?;

        if should_remember_empty(request.empty_weight) {
            self.registry_repo
                .upsert(
                    &mut *tx,
                    &tank_id,
                    request.empty_weight,
                    &content,
                    request.total_weight,
                    request.head_weight,
                )
                .await?;
        }

        let existing = self.inventory_repo.find_for_update(&mut *tx, &tank_id).await?;
        let action = classify(existing.as_ref(), &zone.id);

        if self.enforce_capacity && action != LogAction::Update {
            let occupied = self
                .inventory_repo
                .count_in_zone_excluding(&mut *tx, &zone.id, &tank_id)
                .await?;
            if capacity_rejects(self.enforce_capacity, action, occupied, zone.capacity) {
                return Err(AppError::ZoneFull {
                    zone: zone.id.clone(),
                    capacity: zone.capacity,
                });
            }
        }

        let tank = self
            .inventory_repo
            .upsert(
                &mut *tx,
                &Tank {
                    id: tank_id.clone(),
                    content: content.clone(),
                    zone_id: zone.id.clone(),
                    slot: slot.clone(),
                    weight: net,
                    remark: remark.clone(),
                    arrived_at,
                },
            )
            .await?;

        let log = self
            .log_repo
            .insert(
                &mut *tx,
                &NewLogEntry {
                    logged_at: arrived_at,
                    tank_id,
                    action,
                    zone: zone.name.clone(),
                    slot,
                    user_id: user.id.clone(),
                    content,
                    weight: net,
                    total_weight: request.total_weight,
                    head_weight: request.head_weight,
                    empty_weight: request.empty_weight,
                    remark,
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            tank = %tank.id,
            zone = %zone.id,
            action = %action,
            net = %net,
            user = %user.id,
            "Entrada registrada"
        );

        Ok(GateInOutcome {
            action,
            net_weight: net,
            tank,
            log,
        })
    }

    /// Saída pela portaria: remove o tanque e grava um único 出場.
    pub async fn gate_out(&self, user: &User, tank_id: &str) -> Result<LogEntry, AppError> {
        let tank_id = normalize_tank_id(tank_id);

        let mut tx = self.pool.begin().await?;

        let tank = self
            .inventory_repo
            .find_for_update(&mut *tx, &tank_id)
            .await?
            .ok_or_else(|| AppError::TankNotFound(tank_id.clone()))?;

        // Zona apagada: o histórico fica com o id
        let zone_name = self
            .zone_repo
            .find_by_id(&mut *tx, &tank.zone_id)
            .await?
            .map(|zone| zone.name)
            .unwrap_or_else(|| tank.zone_id.clone());

        self.inventory_repo.delete(&mut *tx, &tank.id).await?;

        let log = self
            .log_repo
            .insert(&mut *tx, &exit_entry(&tank, zone_name, &user.id, Utc::now()))
            .await?;

        tx.commit().await?;

        tracing::info!(tank = %tank.id, zone = %tank.zone_id, user = %user.id, "Saída registrada");
        Ok(log)
    }

    fn resolve_arrival(&self, raw: Option<&str>) -> Result<DateTime<Utc>, AppError> {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => parse_local_time(value, self.yard_offset),
            None => Ok(Utc::now()),
        }
    }
}

// ---
// Regras puras
// ---

pub fn normalize_tank_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub(crate) fn require_tank_id(raw: &str) -> Result<String, AppError> {
    let tank_id = normalize_tank_id(raw);
    if tank_id.is_empty() {
        return Err(required_field("tank_id", "validation.tank_id_required"));
    }
    Ok(tank_id)
}

/// Peso líquido = total - cavalo - tara, nunca negativo. Sem as três leituras, 0.
pub fn net_weight(total: Option<Decimal>, head: Option<Decimal>, empty: Option<Decimal>) -> Decimal {
    match (total, head, empty) {
        (Some(total), Some(head), Some(empty)) => (total - head - empty).max(Decimal::ZERO).round_dp(2),
        _ => Decimal::ZERO,
    }
}

/// Leituras em branco contam como 0 (manutenção do cadastro).
pub fn maintenance_net_weight(
    total: Option<Decimal>,
    head: Option<Decimal>,
    empty: Option<Decimal>,
) -> Decimal {
    let reading = |value: Option<Decimal>| value.unwrap_or(Decimal::ZERO);
    (reading(total) - reading(head) - reading(empty))
        .max(Decimal::ZERO)
        .round_dp(2)
}

pub fn classify(existing: Option<&Tank>, zone_id: &str) -> LogAction {
    match existing {
        None => LogAction::Entry,
        Some(tank) if tank.zone_id == zone_id => LogAction::Update,
        Some(_) => LogAction::Transfer,
    }
}

/// Atualização na mesma zona não ocupa vaga nova; ocupação conta os outros tanques.
pub fn capacity_rejects(enforce: bool, action: LogAction, occupied: i64, capacity: i32) -> bool {
    enforce && action != LogAction::Update && occupied >= i64::from(capacity)
}

// Tara zero ou em branco não sobrescreve o cadastro: "0" digitado conta como leitura ausente.
pub fn should_remember_empty(empty: Option<Decimal>) -> bool {
    matches!(empty, Some(value) if !value.is_zero())
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn exit_entry(tank: &Tank, zone_name: String, user_id: &str, at: DateTime<Utc>) -> NewLogEntry {
    NewLogEntry {
        logged_at: at,
        tank_id: tank.id.clone(),
        action: LogAction::Exit,
        zone: zone_name,
        slot: tank.slot.clone(),
        user_id: user_id.to_string(),
        content: tank.content.clone(),
        weight: tank.weight,
        total_weight: None,
        head_weight: None,
        empty_weight: None,
        remark: String::new(),
    }
}

pub(crate) fn required_field(field: &'static str, message: &'static str) -> AppError {
    let mut error = ValidationError::new("required");
    error.message = Some(message.into());
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::dec;

    fn tank_in(zone_id: &str) -> Tank {
        Tank {
            id: "TNKU1234567".into(),
            content: "ACETONE".into(),
            zone_id: zone_id.into(),
            slot: None,
            weight: dec!(24500),
            remark: String::new(),
            arrived_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_net_weight_basic() {
        assert_eq!(net_weight(Some(dec!(28000)), Some(dec!(0)), Some(dec!(3500))), dec!(24500));
        assert_eq!(
            net_weight(Some(dec!(30000.555)), Some(dec!(7000)), Some(dec!(3500))),
            dec!(19500.56)
        );
    }

    #[test]
    fn test_net_weight_never_negative() {
        assert_eq!(net_weight(Some(dec!(3000)), Some(dec!(7000)), Some(dec!(3500))), Decimal::ZERO);
    }

    #[test]
    fn test_net_weight_missing_reading_is_zero() {
        assert_eq!(net_weight(Some(dec!(28000)), None, Some(dec!(3500))), Decimal::ZERO);
        assert_eq!(net_weight(None, Some(dec!(7000)), Some(dec!(3500))), Decimal::ZERO);
        assert_eq!(net_weight(Some(dec!(28000)), Some(dec!(7000)), None), Decimal::ZERO);
    }

    #[test]
    fn test_maintenance_net_weight_blank_reading_is_zero() {
        assert_eq!(
            maintenance_net_weight(Some(dec!(28000)), None, Some(dec!(3500))),
            dec!(24500)
        );
        assert_eq!(maintenance_net_weight(Some(dec!(28000)), None, None), dec!(28000));
        assert_eq!(maintenance_net_weight(None, Some(dec!(7000)), None), Decimal::ZERO);
        assert_eq!(maintenance_net_weight(None, None, None), Decimal::ZERO);
    }

    #[test]
    fn test_capacity_rejects() {
        // Regra desligada
        assert!(!capacity_rejects(false, LogAction::Entry, 10, 5));
        // Atualização na mesma zona cheia passa
        assert!(!capacity_rejects(true, LogAction::Update, 5, 5));
        // Limite exato
        assert!(capacity_rejects(true, LogAction::Entry, 5, 5));
        assert!(!capacity_rejects(true, LogAction::Entry, 4, 5));
        assert!(capacity_rejects(true, LogAction::Transfer, 5, 5));
        // Zona sem vagas
        assert!(capacity_rejects(true, LogAction::Entry, 0, 0));
        assert!(!capacity_rejects(false, LogAction::Entry, 0, 0));
    }

    #[test]
    fn test_require_tank_id() {
        assert_eq!(require_tank_id(" tnku1234567 ").unwrap(), "TNKU1234567");
        match require_tank_id("   ") {
            Err(AppError::ValidationError(errors)) => {
                assert!(errors.field_errors().contains_key("tank_id"));
            }
            other => panic!("resultado inesperado: {other:?}"),
        }
    }

    #[test]
    fn test_classify_entry_update_transfer() {
        assert_eq!(classify(None, "Z-01"), LogAction::Entry);
        assert_eq!(classify(Some(&tank_in("Z-01")), "Z-01"), LogAction::Update);
        assert_eq!(classify(Some(&tank_in("Z-01")), "Z-02"), LogAction::Transfer);
    }

    #[test]
    fn test_first_entry_then_transfer_example() {
        // TNKU1234567: 28000 total, 0 cavalo, 3500 tara na Z-01 e depois na Z-02
        let net = net_weight(Some(dec!(28000)), Some(dec!(0)), Some(dec!(3500)));
        assert_eq!(net, dec!(24500));
        assert_eq!(classify(None, "Z-01"), LogAction::Entry);

        let stored = tank_in("Z-01");
        assert_eq!(classify(Some(&stored), "Z-02"), LogAction::Transfer);
    }

    #[test]
    fn test_should_remember_empty() {
        assert!(should_remember_empty(Some(dec!(3500))));
        assert!(!should_remember_empty(Some(dec!(0))));
        assert!(!should_remember_empty(None));
    }

    #[test]
    fn test_normalize_tank_id() {
        assert_eq!(normalize_tank_id("  tnku1234567 "), "TNKU1234567");
        assert_eq!(normalize_tank_id("   "), "");
    }

    #[test]
    fn test_non_empty_trims_and_drops_blank() {
        assert_eq!(non_empty(Some("  A-3 ")), Some("A-3".to_string()));
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_exit_entry_copies_last_state() {
        let tank = tank_in("Z-01");
        let at = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        let entry = exit_entry(&tank, "A區".into(), "wang", at);

        assert_eq!(entry.action, LogAction::Exit);
        assert_eq!(entry.tank_id, "TNKU1234567");
        assert_eq!(entry.content, "ACETONE");
        assert_eq!(entry.weight, dec!(24500));
        assert_eq!(entry.zone, "A區");
        assert_eq!(entry.user_id, "wang");
        assert!(entry.total_weight.is_none());
    }

    #[test]
    fn test_blank_tank_id_is_validation_error() {
        let err = required_field("tank_id", "validation.tank_id_required");
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("tank_id"));
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }
}
