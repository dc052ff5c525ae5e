// src/services/dashboard_service.rs

use std::collections::BTreeMap;

use chrono::{FixedOffset, Utc};

use crate::{
    common::{clock::start_of_local_day, error::AppError},
    db::{InventoryRepository, LogRepository, ZoneRepository},
    models::{
        dashboard::{DashboardSummary, ZoneOccupancy},
        inventory::Tank,
        log::LogAction,
        zone::Zone,
    },
};

const RECENT_LOGS: i64 = 5;

#[derive(Clone)]
pub struct DashboardService {
    zone_repo: ZoneRepository,
    inventory_repo: InventoryRepository,
    log_repo: LogRepository,
    yard_offset: FixedOffset,
}

impl DashboardService {
    pub fn new(
        zone_repo: ZoneRepository,
        inventory_repo: InventoryRepository,
        log_repo: LogRepository,
        yard_offset: FixedOffset,
    ) -> Self {
        Self {
            zone_repo,
            inventory_repo,
            log_repo,
            yard_offset,
        }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, AppError> {
        let since = start_of_local_day(Utc::now(), self.yard_offset);

        let (zones, tanks, in_today, out_today, recent_logs) = tokio::try_join!(
            self.zone_repo.list_all(),
            self.inventory_repo.list_all(),
            self.log_repo.count_action_since(LogAction::Entry, since),
            self.log_repo.count_action_since(LogAction::Exit, since),
            self.log_repo.list_recent(RECENT_LOGS),
        )?;

        Ok(DashboardSummary {
            total_tanks: tanks.len() as i64,
            total_capacity: zones.iter().map(|z| i64::from(z.capacity)).sum(),
            in_today,
            out_today,
            zones: zone_occupancy(&zones, &tanks),
            recent_logs,
        })
    }
}

/// Ocupação por zona configurada, mais uma linha para cada zona apagada que ainda tem tanques.
pub fn zone_occupancy(zones: &[Zone], tanks: &[Tank]) -> Vec<ZoneOccupancy> {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for tank in tanks {
        *counts.entry(tank.zone_id.as_str()).or_default() += 1;
    }

    let mut result: Vec<ZoneOccupancy> = zones
        .iter()
        .map(|zone| {
            let count = counts.remove(zone.id.as_str()).unwrap_or(0);
            ZoneOccupancy {
                zone_id: zone.id.clone(),
                name: zone.name.clone(),
                count,
                capacity: zone.capacity,
                occupancy_percent: occupancy_percent(count, zone.capacity),
            }
        })
        .collect();

    // O que sobrou no mapa são tanques órfãos
    result.extend(counts.into_iter().map(|(zone_id, count)| ZoneOccupancy {
        zone_id: zone_id.to_string(),
        name: zone_id.to_string(),
        count,
        capacity: 0,
        occupancy_percent: occupancy_percent(count, 0),
    }));

    result
}

pub fn occupancy_percent(count: i64, capacity: i32) -> f64 {
    if capacity <= 0 {
        return if count == 0 { 0.0 } else { 100.0 };
    }
    let percent = count as f64 * 100.0 / f64::from(capacity);
    (percent * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn zone(id: &str, name: &str, capacity: i32) -> Zone {
        Zone {
            id: id.into(),
            name: name.into(),
            capacity,
            updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn tank(id: &str, zone_id: &str) -> Tank {
        Tank {
            id: id.into(),
            content: "LPG".into(),
            zone_id: zone_id.into(),
            slot: None,
            weight: Decimal::ZERO,
            remark: String::new(),
            arrived_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_occupancy_percent_rounding() {
        assert_eq!(occupancy_percent(1, 3), 33.3);
        assert_eq!(occupancy_percent(2, 3), 66.7);
        assert_eq!(occupancy_percent(35, 35), 100.0);
        assert_eq!(occupancy_percent(40, 35), 114.3);
    }

    #[test]
    fn test_zero_capacity_zone() {
        assert_eq!(occupancy_percent(0, 0), 0.0);
        assert_eq!(occupancy_percent(2, 0), 100.0);
    }

    #[test]
    fn test_zone_occupancy_counts_per_zone() {
        let zones = vec![zone("Z-01", "A區", 4), zone("Z-02", "B區", 10)];
        let tanks = vec![tank("T1", "Z-01"), tank("T2", "Z-01"), tank("T3", "Z-02")];

        let result = zone_occupancy(&zones, &tanks);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].count, 2);
        assert_eq!(result[0].occupancy_percent, 50.0);
        assert_eq!(result[1].name, "B區");
        assert_eq!(result[1].occupancy_percent, 10.0);
    }

    #[test]
    fn test_orphan_tanks_get_their_own_entry() {
        let zones = vec![zone("Z-01", "A區", 4)];
        let tanks = vec![tank("T1", "Z-09"), tank("T2", "Z-09"), tank("T3", "Z-01")];

        let result = zone_occupancy(&zones, &tanks);
        assert_eq!(result.len(), 2);
        let orphan = &result[1];
        assert_eq!(orphan.zone_id, "Z-09");
        assert_eq!(orphan.name, "Z-09");
        assert_eq!(orphan.count, 2);
        assert_eq!(orphan.capacity, 0);
        assert_eq!(orphan.occupancy_percent, 100.0);
    }

    #[test]
    fn test_empty_yard() {
        let zones = vec![zone("Z-01", "A區", 4)];
        let result = zone_occupancy(&zones, &[]);
        assert_eq!(result[0].count, 0);
        assert_eq!(result[0].occupancy_percent, 0.0);
    }
}
