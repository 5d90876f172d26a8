use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{TelegramLinkTokenDB, UserSettingDB};
use crate::convert::format_datetime;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::telegram_link_tokens;
use crate::schema::user_settings;
use planmore_core::errors::Result;
use planmore_core::settings::{SettingsRepositoryTrait, SettingsUpdate, UserSettings};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

fn setting_row(for_user_id: &str, key: &str, value: String) -> UserSettingDB {
    UserSettingDB {
        user_id: for_user_id.to_string(),
        setting_key: key.to_string(),
        setting_value: value,
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self, for_user_id: &str) -> Result<UserSettings> {
        let mut conn = get_connection(&self.pool)?;
        let stored: Vec<(String, String)> = user_settings::table
            .filter(user_settings::user_id.eq(for_user_id))
            .select((user_settings::setting_key, user_settings::setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        // Merge stored rows over defaults so missing keys never fail.
        let mut settings = UserSettings::default_for(for_user_id);

        for (key, value) in stored {
            match key.as_str() {
                "theme" => settings.theme = value,
                "language" => settings.language = value,
                "email_notifications" => {
                    settings.email_notifications = value.parse().unwrap_or(true);
                }
                "update_notifications" => {
                    settings.update_notifications = value.parse().unwrap_or(true);
                }
                "transaction_alerts" => {
                    settings.transaction_alerts = value.parse().unwrap_or(true);
                }
                "telegram_enabled" => {
                    settings.telegram_enabled = value.parse().unwrap_or(false);
                }
                "telegram_chat_id" => settings.telegram_chat_id = Some(value),
                _ => {} // Ignore unknown settings
            }
        }

        Ok(settings)
    }

    async fn update_settings(&self, for_user_id: &str, update: SettingsUpdate) -> Result<()> {
        let owner_id = for_user_id.to_string();
        self.writer
            .exec(move |conn| {
                if let Some(ref theme) = update.theme {
                    diesel::replace_into(user_settings::table)
                        .values(&setting_row(&owner_id, "theme", theme.clone()))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                if let Some(ref language) = update.language {
                    diesel::replace_into(user_settings::table)
                        .values(&setting_row(&owner_id, "language", language.clone()))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                if let Some(email_notifications) = update.email_notifications {
                    diesel::replace_into(user_settings::table)
                        .values(&setting_row(
                            &owner_id,
                            "email_notifications",
                            email_notifications.to_string(),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                if let Some(update_notifications) = update.update_notifications {
                    diesel::replace_into(user_settings::table)
                        .values(&setting_row(
                            &owner_id,
                            "update_notifications",
                            update_notifications.to_string(),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                if let Some(transaction_alerts) = update.transaction_alerts {
                    diesel::replace_into(user_settings::table)
                        .values(&setting_row(
                            &owner_id,
                            "transaction_alerts",
                            transaction_alerts.to_string(),
                        ))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                Ok(())
            })
            .await
    }

    async fn set_telegram_chat(&self, for_user_id: &str, chat_id: &str) -> Result<()> {
        let owner_id = for_user_id.to_string();
        let chat_id = chat_id.to_string();
        self.writer
            .exec(move |conn| {
                // Both rows land in one write so the channel is never
                // half-configured.
                diesel::replace_into(user_settings::table)
                    .values(&setting_row(&owner_id, "telegram_enabled", "true".into()))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::replace_into(user_settings::table)
                    .values(&setting_row(&owner_id, "telegram_chat_id", chat_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn clear_telegram_chat(&self, for_user_id: &str) -> Result<()> {
        let owner_id = for_user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::replace_into(user_settings::table)
                    .values(&setting_row(&owner_id, "telegram_enabled", "false".into()))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::delete(
                    user_settings::table
                        .filter(user_settings::user_id.eq(&owner_id))
                        .filter(user_settings::setting_key.eq("telegram_chat_id")),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn insert_link_token(&self, for_user_id: &str, token: &str) -> Result<()> {
        let row = TelegramLinkTokenDB {
            token: token.to_string(),
            user_id: for_user_id.to_string(),
            created_at: format_datetime(Utc::now()),
        };
        self.writer
            .exec(move |conn| {
                diesel::insert_into(telegram_link_tokens::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn consume_link_token(&self, token: &str) -> Result<String> {
        let token = token.to_string();
        self.writer
            .exec(move |conn| {
                // Delete-with-returning makes redemption single-use: the
                // second caller sees NotFound.
                let owner_id: String = diesel::delete(
                    telegram_link_tokens::table.filter(telegram_link_tokens::token.eq(&token)),
                )
                .returning(telegram_link_tokens::user_id)
                .get_result(conn)
                .map_err(StorageError::from)?;
                Ok(owner_id)
            })
            .await
    }
}
