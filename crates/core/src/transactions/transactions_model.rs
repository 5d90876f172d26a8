//! Transaction domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::transactions::TransactionError;

/// Direction of a financial movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(TransactionKind::Income),
            "EXPENSE" => Ok(TransactionKind::Expense),
            other => Err(TransactionError::InvalidData(format!(
                "Unknown transaction kind '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Calendar interval applied between consecutive rows of a recurring series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceInterval {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceInterval::Daily => "DAILY",
            RecurrenceInterval::Weekly => "WEEKLY",
            RecurrenceInterval::Monthly => "MONTHLY",
            RecurrenceInterval::Yearly => "YEARLY",
        }
    }
}

impl FromStr for RecurrenceInterval {
    type Err = TransactionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DAILY" => Ok(RecurrenceInterval::Daily),
            "WEEKLY" => Ok(RecurrenceInterval::Weekly),
            "MONTHLY" => Ok(RecurrenceInterval::Monthly),
            "YEARLY" => Ok(RecurrenceInterval::Yearly),
            other => Err(TransactionError::InvalidInterval(format!(
                "Unknown recurrence interval '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing one persisted financial movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub group_id: Option<String>,
    pub description: Option<String>,
    /// Effective date of the movement.
    pub date: NaiveDate,
    pub is_fixed: bool,
    pub is_installment: bool,
    pub is_recurring: bool,
    pub is_active: bool,
    /// 1-based position within an installment series.
    pub installment_number: Option<i32>,
    pub installment_count: Option<i32>,
    /// Shared by all rows generated from one submission.
    pub batch_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-submitted intent for creating one transaction or a whole series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub group_id: Option<String>,
    pub description: Option<String>,
    /// Anchor date: the date of the first (or only) generated row.
    pub date: NaiveDate,
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default)]
    pub is_installment: bool,
    pub installment_count: Option<u32>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurrence_interval: Option<RecurrenceInterval>,
    /// Inclusive end date of a recurring series.
    pub recurrence_end_date: Option<NaiveDate>,
}

/// One expanded row ready for insertion. The repository assigns the row id
/// and audit timestamps; everything else is fixed by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionRow {
    pub user_id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub group_id: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_fixed: bool,
    pub is_installment: bool,
    pub is_recurring: bool,
    pub installment_number: Option<i32>,
    pub installment_count: Option<i32>,
    pub batch_id: Option<String>,
}

/// Payload for updating a single existing transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category_id: Option<String>,
    pub group_id: Option<String>,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub is_fixed: bool,
    pub is_active: bool,
}
