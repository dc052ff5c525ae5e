pub mod auth;
pub mod dashboard;
pub mod gate;
pub mod inventory;
pub mod logs;
pub mod users;
pub mod zones;
