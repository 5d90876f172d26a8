//! Database models for per-user settings and chat link tokens.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One stored preference row. Settings are key-value per user so new
/// preferences never need a schema migration.
#[derive(Queryable, Insertable, Identifiable, AsChangeset, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::user_settings)]
#[diesel(primary_key(user_id, setting_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserSettingDB {
    pub user_id: String,
    pub setting_key: String,
    pub setting_value: String,
}

/// A pending single-use chat linking token.
#[derive(Queryable, Insertable, Identifiable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::telegram_link_tokens)]
#[diesel(primary_key(token))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TelegramLinkTokenDB {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
}
