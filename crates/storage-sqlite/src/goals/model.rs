//! Database models for goals.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use planmore_core::goals::{Goal, GoalStatus, NewGoal};

use crate::convert::{
    format_date, format_datetime, parse_date_tolerant, parse_datetime_tolerant,
    parse_decimal_tolerant,
};

/// Database model for goals
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
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            target_amount: parse_decimal_tolerant(&db.target_amount, "target_amount"),
            current_amount: parse_decimal_tolerant(&db.current_amount, "current_amount"),
            deadline: db.deadline.map(|d| parse_date_tolerant(&d, "deadline")),
            status: GoalStatus::from_str(&db.status).unwrap_or_default(),
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updated_at"),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
        }
    }
}

impl GoalDB {
    /// Builds an insert-ready row from a new-goal intent.
    pub fn from_new_goal(for_user_id: &str, new_goal: NewGoal) -> Self {
        let now = format_datetime(Utc::now());
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: for_user_id.to_string(),
            name: new_goal.name,
            target_amount: new_goal.target_amount.to_string(),
            current_amount: new_goal.current_amount.to_string(),
            deadline: new_goal.deadline.map(format_date),
            status: GoalStatus::InProgress.as_str().to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
