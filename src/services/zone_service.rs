// src/services/zone_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, ZoneRepository},
    models::{
        inventory::Tank,
        zone::{SlotStatus, Zone, ZonePayload},
    },
    services::gate_service::required_field,
};

#[derive(Clone)]
pub struct ZoneService {
    pool: PgPool,
    zone_repo: ZoneRepository,
    inventory_repo: InventoryRepository,
}

impl ZoneService {
    pub fn new(pool: PgPool, zone_repo: ZoneRepository, inventory_repo: InventoryRepository) -> Self {
        Self {
            pool,
            zone_repo,
            inventory_repo,
        }
    }

    pub async fn list(&self) -> Result<Vec<Zone>, AppError> {
        self.zone_repo.list_all().await
    }

    /// Salva a configuração inteira; ou grava todas as zonas ou nenhuma.
    pub async fn save_all(&self, zones: &[ZonePayload]) -> Result<Vec<Zone>, AppError> {
        let zones = normalize_zones(zones)?;

        let mut tx = self.pool.begin().await?;

        let mut saved = Vec::with_capacity(zones.len());
        for zone in &zones {
            let item = self
                .zone_repo
                .upsert(&mut *tx, &zone.id, &zone.name, zone.capacity)
                .await?;
            saved.push(item);
        }

        tx.commit().await?;

        tracing::info!(count = saved.len(), "Zonas salvas");
        Ok(saved)
    }

    // Tanques que estavam na zona continuam no inventário (aparecem como órfãos no painel)
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !self.zone_repo.delete(id).await? {
            return Err(AppError::ZoneNotFound(id.to_string()));
        }
        tracing::info!(zone = %id, "Zona apagada");
        Ok(())
    }

    pub async fn slots(&self, id: &str) -> Result<Vec<SlotStatus>, AppError> {
        let zone = self
            .zone_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ZoneNotFound(id.to_string()))?;

        let tanks = self.inventory_repo.list_by_zone(&zone.id).await?;
        Ok(slot_layout(&zone, &tanks))
    }
}

/// Apara id e nome; em branco depois de aparar é erro de validação.
pub fn normalize_zones(zones: &[ZonePayload]) -> Result<Vec<ZonePayload>, AppError> {
    zones
        .iter()
        .map(|zone| {
            let id = zone.id.trim();
            if id.is_empty() {
                return Err(required_field("id", "validation.zone_id_required"));
            }
            let name = zone.name.trim();
            if name.is_empty() {
                return Err(required_field("name", "validation.zone_name_required"));
            }
            Ok(ZonePayload {
                id: id.to_string(),
                name: name.to_string(),
                capacity: zone.capacity,
            })
        })
        .collect()
}

/// Posições "{nome}-1" até "{nome}-{capacidade}" com o tanque que ocupa cada uma.
pub fn slot_layout(zone: &Zone, tanks: &[Tank]) -> Vec<SlotStatus> {
    (1..=zone.capacity.max(0))
        .map(|n| {
            let slot = format!("{}-{}", zone.name, n);
            let tank_id = tanks
                .iter()
                .find(|tank| tank.slot.as_deref() == Some(slot.as_str()))
                .map(|tank| tank.id.clone());
            SlotStatus { slot, tank_id }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn zone(capacity: i32) -> Zone {
        Zone {
            id: "Z-01".into(),
            name: "A區".into(),
            capacity,
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn tank(id: &str, slot: Option<&str>) -> Tank {
        Tank {
            id: id.into(),
            content: "LPG".into(),
            zone_id: "Z-01".into(),
            slot: slot.map(str::to_string),
            weight: Decimal::ZERO,
            remark: String::new(),
            arrived_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_slot_layout_marks_occupied_slots() {
        let tanks = vec![tank("T1", Some("A區-2")), tank("T2", None)];
        let slots = slot_layout(&zone(3), &tanks);

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], SlotStatus { slot: "A區-1".into(), tank_id: None });
        assert_eq!(slots[1].tank_id.as_deref(), Some("T1"));
        assert!(slots[2].tank_id.is_none());
    }

    fn payload(id: &str, name: &str) -> ZonePayload {
        ZonePayload {
            id: id.into(),
            name: name.into(),
            capacity: 10,
        }
    }

    #[test]
    fn test_normalize_zones_trims() {
        let zones = normalize_zones(&[payload(" Z-01 ", " A區 ")]).unwrap();
        assert_eq!(zones[0].id, "Z-01");
        assert_eq!(zones[0].name, "A區");
        assert_eq!(zones[0].capacity, 10);
    }

    #[test]
    fn test_normalize_zones_rejects_blank_after_trim() {
        let err = normalize_zones(&[payload("Z-01", "A區"), payload("  ", "B區")]).unwrap_err();
        match err {
            AppError::ValidationError(errors) => assert!(errors.field_errors().contains_key("id")),
            other => panic!("erro inesperado: {other:?}"),
        }

        let err = normalize_zones(&[payload("Z-02", " ")]).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_zero_capacity_has_no_slots() {
        assert!(slot_layout(&zone(0), &[tank("T1", Some("A區-1"))]).is_empty());
    }
}
