//! Transaction series expansion.
//!
//! Expands one user-submitted intent into the full set of rows to persist:
//! a single row, a fixed-count installment series spaced one calendar month
//! apart, or a recurring series stepped by a calendar interval up to an
//! inclusive end date. All validation happens before any row is produced.
//!
//! Month arithmetic is anchored: row dates are computed as `anchor + k
//! months` rather than by chaining, so a day-of-month that was clamped in a
//! short month (Jan 31 -> Feb 28) is restored in later months (Mar 31).
//! Clamping itself follows `chrono::Months`, which caps at the last day of
//! the target month.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::constants::MAX_INSTALLMENT_COUNT;
use crate::transactions::transactions_model::{
    NewTransaction, NewTransactionRow, RecurrenceInterval,
};
use crate::transactions::TransactionError;
use crate::Result;

/// Resolved generation mode for one intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesMode {
    Single,
    Installment { count: u32 },
    Recurring {
        interval: RecurrenceInterval,
        end_date: NaiveDate,
    },
}

/// Validates the intent and resolves which of the three modes applies.
///
/// Installment mode (count > 1) takes priority over recurring mode even if
/// both flags are set; the recurring fields are ignored in that case.
pub fn resolve_mode(intent: &NewTransaction) -> Result<SeriesMode> {
    if intent.amount <= Decimal::ZERO {
        return Err(TransactionError::InvalidAmount(format!(
            "Amount must be positive, got {}",
            intent.amount
        ))
        .into());
    }

    if intent.is_installment {
        let count = intent.installment_count.ok_or_else(|| {
            TransactionError::InvalidInstallmentCount(
                "Installment transactions require an installment count".to_string(),
            )
        })?;
        if count == 0 || count > MAX_INSTALLMENT_COUNT {
            return Err(TransactionError::InvalidInstallmentCount(format!(
                "Installment count must be between 1 and {}, got {}",
                MAX_INSTALLMENT_COUNT, count
            ))
            .into());
        }
        if count > 1 {
            return Ok(SeriesMode::Installment { count });
        }
        // A one-installment purchase is just a single transaction.
        return Ok(SeriesMode::Single);
    }

    if intent.is_recurring {
        let interval = intent.recurrence_interval.ok_or_else(|| {
            TransactionError::InvalidInterval(
                "Recurring transactions require a recurrence interval".to_string(),
            )
        })?;
        let end_date = intent.recurrence_end_date.ok_or_else(|| {
            TransactionError::InvalidDateRange(
                "Recurring transactions require an end date".to_string(),
            )
        })?;
        if end_date < intent.date {
            return Err(TransactionError::InvalidDateRange(format!(
                "End date {} is before the start date {}",
                end_date, intent.date
            ))
            .into());
        }
        return Ok(SeriesMode::Recurring { interval, end_date });
    }

    Ok(SeriesMode::Single)
}

/// Date of the k-th row (0-based) of a series anchored at `anchor`.
fn step_date(anchor: NaiveDate, interval: RecurrenceInterval, k: u32) -> Option<NaiveDate> {
    match interval {
        RecurrenceInterval::Daily => anchor.checked_add_days(Days::new(k as u64)),
        RecurrenceInterval::Weekly => anchor.checked_add_days(Days::new(7 * k as u64)),
        RecurrenceInterval::Monthly => anchor.checked_add_months(Months::new(k)),
        RecurrenceInterval::Yearly => anchor.checked_add_months(Months::new(12 * k)),
    }
}

/// Expands an intent into the rows to persist for `user_id`.
///
/// Returns exactly one row without a batch id for single mode, `count` rows
/// for installment mode, and one row per interval step up to and including
/// the end date for recurring mode. Series rows share one freshly generated
/// batch id.
pub fn expand(user_id: &str, intent: &NewTransaction) -> Result<Vec<NewTransactionRow>> {
    let mode = resolve_mode(intent)?;

    let base_row = |date: NaiveDate| NewTransactionRow {
        user_id: user_id.to_string(),
        kind: intent.kind,
        amount: intent.amount,
        category_id: intent.category_id.clone(),
        group_id: intent.group_id.clone(),
        description: intent.description.clone(),
        date,
        is_fixed: intent.is_fixed,
        is_installment: false,
        is_recurring: false,
        installment_number: None,
        installment_count: None,
        batch_id: None,
    };

    match mode {
        SeriesMode::Single => Ok(vec![base_row(intent.date)]),

        SeriesMode::Installment { count } => {
            let batch_id = Uuid::new_v4().to_string();
            let mut rows = Vec::with_capacity(count as usize);
            for i in 1..=count {
                let date = intent
                    .date
                    .checked_add_months(Months::new(i - 1))
                    .ok_or_else(|| {
                        TransactionError::InvalidDateRange(format!(
                            "Installment {} of {} overflows the calendar",
                            i, count
                        ))
                    })?;
                let mut row = base_row(date);
                row.is_installment = true;
                row.installment_number = Some(i as i32);
                row.installment_count = Some(count as i32);
                row.batch_id = Some(batch_id.clone());
                rows.push(row);
            }
            Ok(rows)
        }

        SeriesMode::Recurring { interval, end_date } => {
            let batch_id = Uuid::new_v4().to_string();
            let mut rows = Vec::new();
            let mut k: u32 = 0;
            // Terminates because every interval strictly advances the date.
            while let Some(date) = step_date(intent.date, interval, k) {
                if date > end_date {
                    break;
                }
                let mut row = base_row(date);
                row.is_recurring = true;
                row.batch_id = Some(batch_id.clone());
                rows.push(row);
                k += 1;
            }
            Ok(rows)
        }
    }
}
