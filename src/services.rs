pub mod auth;
pub mod dashboard_service;
pub mod gate_service;
pub mod log_service;
pub mod tank_service;
pub mod user_service;
pub mod zone_service;
