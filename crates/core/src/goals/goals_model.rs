//! Goal domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

const HUNDRED: Decimal = dec!(100);

/// Lifecycle status of a savings goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    InProgress,
    Achieved,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "IN_PROGRESS",
            GoalStatus::Achieved => "ACHIEVED",
            GoalStatus::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN_PROGRESS" => Ok(GoalStatus::InProgress),
            "ACHIEVED" => Ok(GoalStatus::Achieved),
            "CANCELLED" => Ok(GoalStatus::Cancelled),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown goal status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings/debt/investment target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Progress towards the target, clamped to [0, 100]. Defined as 0 when
    /// the target amount is not positive.
    pub fn progress_percent(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let pct = HUNDRED * self.current_amount / self.target_amount;
        pct.clamp(Decimal::ZERO, HUNDRED)
    }

    /// Amount still missing; negative once the target is exceeded.
    pub fn remaining(&self) -> Decimal {
        self.target_amount - self.current_amount
    }

    /// Unclamped share of the target still missing, as a percentage.
    /// Zero or negative once the goal is fully funded.
    pub fn percent_remaining(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        HUNDRED * self.remaining() / self.target_amount
    }
}

/// Input model for creating a new goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
}

/// Payload for updating an existing goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
}
