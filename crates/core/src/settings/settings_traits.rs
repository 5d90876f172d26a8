use crate::settings::settings_model::{SettingsUpdate, TelegramLink, UserSettings};
use crate::Result;
use async_trait::async_trait;

/// Trait for settings repository operations.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Reads the stored rows for the user and merges them over
    /// `UserSettings::default_for`; never fails on missing keys.
    fn get_settings(&self, user_id: &str) -> Result<UserSettings>;
    async fn update_settings(&self, user_id: &str, update: SettingsUpdate) -> Result<()>;
    /// Stores the chat destination and flips the telegram flag in one write.
    async fn set_telegram_chat(&self, user_id: &str, chat_id: &str) -> Result<()>;
    async fn clear_telegram_chat(&self, user_id: &str) -> Result<()>;
    async fn insert_link_token(&self, user_id: &str, token: &str) -> Result<()>;
    /// Redeems a link token, deleting it in the same write so it can be
    /// used at most once. Returns the user id the token was issued for.
    async fn consume_link_token(&self, token: &str) -> Result<String>;
}

/// Trait for settings service operations.
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self, user_id: &str) -> Result<UserSettings>;
    async fn update_settings(&self, user_id: &str, update: SettingsUpdate) -> Result<()>;
    /// Starts the linking handshake: issues a fresh single-use token and
    /// returns the deep link to hand to the user.
    async fn issue_telegram_link(&self, user_id: &str) -> Result<TelegramLink>;
    /// Completes the handshake from the inbound bot webhook: consumes the
    /// token and binds the chat destination to its user.
    async fn complete_telegram_link(&self, token: &str, chat_id: &str) -> Result<String>;
    async fn disable_telegram(&self, user_id: &str) -> Result<()>;
}
