//! SQLite storage implementation for settings.

mod model;
mod repository;

pub use model::{TelegramLinkTokenDB, UserSettingDB};
pub use repository::SettingsRepository;

// Re-export trait from core for convenience
pub use planmore_core::settings::SettingsRepositoryTrait;
