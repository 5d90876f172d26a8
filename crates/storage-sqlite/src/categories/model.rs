//! Database models for categories and groups.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use planmore_core::categories::{Category, Group};

use crate::convert::{format_datetime, parse_datetime_tolerant};

/// Database model for categories
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: String,
}

impl CategoryDB {
    pub fn from_new(for_user_id: &str, category_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: for_user_id.to_string(),
            name: category_name,
            created_at: format_datetime(Utc::now()),
        }
    }
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
        }
    }
}

/// Database model for groups
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::groups)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GroupDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: String,
}

impl GroupDB {
    pub fn from_new(for_user_id: &str, group_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: for_user_id.to_string(),
            name: group_name,
            created_at: format_datetime(Utc::now()),
        }
    }
}

impl From<GroupDB> for Group {
    fn from(db: GroupDB) -> Self {
        Self {
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
        }
    }
}
