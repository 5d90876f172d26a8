//! User settings domain models.

use serde::{Deserialize, Serialize};

/// Per-user preferences, merged over defaults at read time so no key is
/// ever assumed to be present in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub user_id: String,
    pub theme: String,
    pub language: String,
    /// Master switch for the email channel.
    pub email_notifications: bool,
    /// Product/update announcements preference (not read by the policy
    /// engine; stored for the outer surfaces).
    pub update_notifications: bool,
    /// Per-transaction alert preference (not read by the policy engine).
    pub transaction_alerts: bool,
    pub telegram_enabled: bool,
    /// Chat destination id; only meaningful while `telegram_enabled` is
    /// true. Set exactly once per linking handshake.
    pub telegram_chat_id: Option<String>,
}

impl UserSettings {
    pub fn default_for(user_id: &str) -> Self {
        UserSettings {
            user_id: user_id.to_string(),
            theme: "light".to_string(),
            language: "en".to_string(),
            email_notifications: true,
            update_notifications: true,
            transaction_alerts: true,
            telegram_enabled: false,
            telegram_chat_id: None,
        }
    }

    /// Whether the chat channel is fully configured.
    pub fn chat_channel_ready(&self) -> bool {
        self.telegram_enabled && self.telegram_chat_id.is_some()
    }

    /// Whether at least one notification channel is enabled.
    pub fn any_channel_enabled(&self) -> bool {
        self.email_notifications || self.chat_channel_ready()
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub theme: Option<String>,
    pub language: Option<String>,
    pub email_notifications: Option<bool>,
    pub update_notifications: Option<bool>,
    pub transaction_alerts: Option<bool>,
}

/// A pending chat-bot link invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramLink {
    /// Single-use token embedded in the deep link.
    pub token: String,
    /// Deep link the user opens in the Telegram client.
    pub deep_link: String,
}
