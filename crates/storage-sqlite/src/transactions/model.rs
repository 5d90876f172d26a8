//! Database models for transactions.

use chrono::Utc;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use planmore_core::transactions::{NewTransactionRow, Transaction, TransactionKind};

use crate::convert::{
    format_date, format_datetime, parse_date_tolerant, parse_datetime_tolerant,
    parse_decimal_tolerant,
};

/// Database model for transactions
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub amount: String,
    pub category_id: Option<String>,
    pub group_id: Option<String>,
    pub description: Option<String>,
    pub date: String,
    pub is_fixed: bool,
    pub is_installment: bool,
    pub is_recurring: bool,
    pub is_active: bool,
    pub installment_number: Option<i32>,
    pub installment_count: Option<i32>,
    pub batch_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            kind: TransactionKind::from_str(&db.kind).unwrap_or_default(),
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            date: parse_date_tolerant(&db.date, "date"),
            created_at: parse_datetime_tolerant(&db.created_at, "created_at"),
            updated_at: parse_datetime_tolerant(&db.updated_at, "updated_at"),
            id: db.id,
            user_id: db.user_id,
            category_id: db.category_id,
            group_id: db.group_id,
            description: db.description,
            is_fixed: db.is_fixed,
            is_installment: db.is_installment,
            is_recurring: db.is_recurring,
            is_active: db.is_active,
            installment_number: db.installment_number,
            installment_count: db.installment_count,
            batch_id: db.batch_id,
        }
    }
}

impl From<NewTransactionRow> for TransactionDB {
    fn from(row: NewTransactionRow) -> Self {
        let now = format_datetime(Utc::now());
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: row.user_id,
            kind: row.kind.as_str().to_string(),
            amount: row.amount.to_string(),
            category_id: row.category_id,
            group_id: row.group_id,
            description: row.description,
            date: format_date(row.date),
            is_fixed: row.is_fixed,
            is_installment: row.is_installment,
            is_recurring: row.is_recurring,
            is_active: true,
            installment_number: row.installment_number,
            installment_count: row.installment_count,
            batch_id: row.batch_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
