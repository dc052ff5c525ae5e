pub mod user_repo;
pub use user_repo::UserRepository;
pub mod zone_repo;
pub use zone_repo::ZoneRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod registry_repo;
pub use registry_repo::RegistryRepository;
pub mod log_repo;
pub use log_repo::LogRepository;
