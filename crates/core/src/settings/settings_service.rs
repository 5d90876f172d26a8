use log::debug;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;

use crate::settings::settings_model::{SettingsUpdate, TelegramLink, UserSettings};
use crate::settings::{SettingsRepositoryTrait, SettingsServiceTrait};
use crate::Result;
use async_trait::async_trait;

/// Length of the single-use link token.
const LINK_TOKEN_LEN: usize = 32;

/// Service for user preferences and the chat-bot linking handshake.
pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    /// Bot username used to build `t.me` deep links.
    bot_username: String,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>, bot_username: &str) -> Self {
        SettingsService {
            settings_repository,
            bot_username: bot_username.to_string(),
        }
    }

    fn generate_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(LINK_TOKEN_LEN)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self, user_id: &str) -> Result<UserSettings> {
        self.settings_repository.get_settings(user_id)
    }

    async fn update_settings(&self, user_id: &str, update: SettingsUpdate) -> Result<()> {
        self.settings_repository.update_settings(user_id, update).await
    }

    async fn issue_telegram_link(&self, user_id: &str) -> Result<TelegramLink> {
        let token = Self::generate_token();
        self.settings_repository
            .insert_link_token(user_id, &token)
            .await?;
        let deep_link = format!("https://t.me/{}?start={}", self.bot_username, token);
        debug!("Issued telegram link token for user {}", user_id);
        Ok(TelegramLink { token, deep_link })
    }

    async fn complete_telegram_link(&self, token: &str, chat_id: &str) -> Result<String> {
        let user_id = self.settings_repository.consume_link_token(token).await?;
        self.settings_repository
            .set_telegram_chat(&user_id, chat_id)
            .await?;
        debug!("Linked telegram chat for user {}", user_id);
        Ok(user_id)
    }

    async fn disable_telegram(&self, user_id: &str) -> Result<()> {
        self.settings_repository.clear_telegram_chat(user_id).await
    }
}
