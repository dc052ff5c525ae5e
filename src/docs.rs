// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::refresh,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::change_password,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::update_permission,

        // --- Gate ---
        handlers::gate::gate_in,
        handlers::gate::gate_out,

        // --- Inventory ---
        handlers::inventory::list_inventory,
        handlers::inventory::get_snapshot,
        handlers::inventory::get_tank_profile,
        handlers::inventory::update_registry,

        // --- Zones ---
        handlers::zones::list_zones,
        handlers::zones::save_zones,
        handlers::zones::delete_zone,
        handlers::zones::list_slots,

        // --- Logs ---
        handlers::logs::list_logs,
        handlers::logs::export_logs,
        handlers::logs::update_log,
        handlers::logs::delete_log,

        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            models::response::MessageResponse,

            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdatePermissionPayload,
            models::auth::ChangePasswordPayload,
            models::auth::UserResponse,

            // --- Inventory ---
            models::inventory::Tank,
            models::inventory::RegistryItem,
            models::inventory::Snapshot,
            models::inventory::TankProfile,
            models::inventory::HistoryPoint,
            models::inventory::TankProfileResponse,
            models::inventory::GateInPayload,
            models::inventory::GateInResponse,
            models::inventory::GateOutResponse,
            models::inventory::UpdateRegistryPayload,
            models::inventory::RegistryUpdatedResponse,

            // --- Zones ---
            models::zone::Zone,
            models::zone::ZonePayload,
            models::zone::SaveZonesPayload,
            models::zone::SaveZonesResponse,
            models::zone::SlotStatus,

            // --- Logs ---
            models::log::LogAction,
            models::log::LogEntry,
            models::log::LogPage,
            models::log::UpdateLogPayload,
            models::log::LogUpdatedResponse,

            // --- Dashboard ---
            models::dashboard::ZoneOccupancy,
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Login e renovação do token"),
        (name = "Users", description = "Contas e permissões"),
        (name = "Gate", description = "Entrada e saída de tanques"),
        (name = "Inventory", description = "Tanques no pátio e cadastro"),
        (name = "Zones", description = "Configuração das zonas"),
        (name = "Logs", description = "Histórico de movimentação e exportação"),
        (name = "Dashboard", description = "Ocupação e movimento do dia")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
