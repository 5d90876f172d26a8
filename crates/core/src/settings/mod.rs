//! Settings module - user preferences and the chat-bot linking handshake.

mod settings_model;
mod settings_service;
mod settings_traits;

pub use settings_model::{SettingsUpdate, TelegramLink, UserSettings};
pub use settings_service::SettingsService;
pub use settings_traits::{SettingsRepositoryTrait, SettingsServiceTrait};
