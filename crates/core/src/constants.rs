//! Application-wide constants.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Upper bound on installment series length (10 years of monthly payments).
pub const MAX_INSTALLMENT_COUNT: u32 = 120;

/// A goal qualifies for the nearly-reached notification once the remaining
/// share of the target drops to this percentage or below.
pub const GOAL_ALERT_REMAINING_PERCENT: Decimal = dec!(20);

/// Default number of days without transactions before the inactivity
/// notification fires.
pub const DEFAULT_INACTIVITY_THRESHOLD_DAYS: i64 = 2;

/// Placeholder shown in notifications when a transaction has no description.
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "(no description)";
