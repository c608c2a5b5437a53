//! SQLite storage implementation for settings.

mod model;
mod repository;

pub use model::AppSettingDb;
pub use repository::SettingsRepository;

// Re-export trait from core for convenience
pub use stockpulse_core::settings::SettingsRepositoryTrait;
