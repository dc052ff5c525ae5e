// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::log::LogEntry;

// Ocupação de uma zona (gráfico de pizza / kanban)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOccupancy {
    pub zone_id: String,
    pub name: String,
    pub count: i64,
    pub capacity: i32,
    /// 0.0 a 100.0+ (pode passar de 100 quando a zona está acima do limite).
    pub occupancy_percent: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_tanks: i64,
    pub total_capacity: i64,
    pub in_today: i64,  // Entradas desde a meia-noite local
    pub out_today: i64, // Saídas desde a meia-noite local
    pub zones: Vec<ZoneOccupancy>,
    pub recent_logs: Vec<LogEntry>,
}
