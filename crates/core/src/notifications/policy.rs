//! Notification policy decisions and message formatting.
//!
//! Pure functions: given domain state, decide whether a trigger fires and
//! produce the channel-ready message. Channel selection and delivery live
//! in the notification service.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::constants::{GOAL_ALERT_REMAINING_PERCENT, NO_DESCRIPTION_PLACEHOLDER};
use crate::goals::{Goal, GoalStatus};
use crate::notifications::notifications_model::NotificationMessage;
use crate::transactions::Transaction;

/// Currency and percentage values are always rendered with two decimals.
fn format_2dp(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Goal-nearly-reached trigger.
///
/// Fires only for in-progress goals with a positive target whose remaining
/// share is at or below the alert threshold. There is no lower bound: a
/// goal at or past 100% still qualifies.
pub fn goal_nearly_reached(goal: &Goal) -> Option<NotificationMessage> {
    if goal.status != GoalStatus::InProgress || goal.target_amount <= Decimal::ZERO {
        return None;
    }
    let percent_remaining = goal.percent_remaining();
    if percent_remaining > GOAL_ALERT_REMAINING_PERCENT {
        return None;
    }
    Some(NotificationMessage {
        subject: format!("Goal \"{}\" is almost reached", goal.name),
        body: format!(
            "Your goal \"{}\" is only {}% away from completion: {} of {} remaining.",
            goal.name,
            format_2dp(percent_remaining),
            format_2dp(goal.remaining()),
            format_2dp(goal.target_amount),
        ),
    })
}

/// User-inactive trigger cutoff, at day granularity.
///
/// The boundary is strict: a user whose latest transaction is dated exactly
/// `today - threshold_days` is not yet inactive.
pub fn is_inactive(last_date: NaiveDate, today: NaiveDate, threshold_days: i64) -> bool {
    if threshold_days < 0 {
        return false;
    }
    match today.checked_sub_days(Days::new(threshold_days as u64)) {
        Some(cutoff) => last_date < cutoff,
        None => false,
    }
}

pub fn inactivity_reminder(threshold_days: i64) -> NotificationMessage {
    NotificationMessage {
        subject: "We miss your transactions".to_string(),
        body: format!(
            "You have not recorded any transactions for more than {} days. \
             Keeping your records up to date makes your reports accurate.",
            threshold_days
        ),
    }
}

/// Recurring-transaction-created trigger message. Fired once per
/// automatically generated recurring row; installment rows are not notified.
pub fn recurring_created(transaction: &Transaction) -> NotificationMessage {
    let description = transaction
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION_PLACEHOLDER);
    NotificationMessage {
        subject: "Recurring transaction created".to_string(),
        body: format!(
            "A recurring transaction was created: {} ({}) on {}.",
            description,
            format_2dp(transaction.amount),
            transaction.date,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn goal(target: Decimal, current: Decimal, status: GoalStatus) -> Goal {
        Goal {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            name: "Emergency fund".to_string(),
            target_amount: target,
            current_amount: current,
            deadline: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn goal_alert_fires_at_80_percent_complete() {
        let msg =
            goal_nearly_reached(&goal(dec!(1000), dec!(850), GoalStatus::InProgress)).unwrap();
        assert!(msg.body.contains("15.00%"));
        assert!(msg.body.contains("150.00"));
        assert!(msg.body.contains("1000.00"));
    }

    #[test]
    fn goal_alert_threshold_is_inclusive() {
        // Exactly 20% remaining qualifies.
        assert!(goal_nearly_reached(&goal(dec!(1000), dec!(800), GoalStatus::InProgress)).is_some());
        // 20.1% remaining does not.
        assert!(goal_nearly_reached(&goal(dec!(1000), dec!(799), GoalStatus::InProgress)).is_none());
    }

    #[test]
    fn goal_alert_fires_past_full_funding() {
        let msg =
            goal_nearly_reached(&goal(dec!(1000), dec!(1200), GoalStatus::InProgress)).unwrap();
        assert!(msg.body.contains("-20.00%"));
    }

    #[test]
    fn goal_alert_requires_in_progress_status() {
        assert!(goal_nearly_reached(&goal(dec!(1000), dec!(900), GoalStatus::Achieved)).is_none());
        assert!(goal_nearly_reached(&goal(dec!(1000), dec!(900), GoalStatus::Cancelled)).is_none());
    }

    #[test]
    fn goal_alert_skips_non_positive_targets() {
        assert!(goal_nearly_reached(&goal(dec!(0), dec!(900), GoalStatus::InProgress)).is_none());
        assert!(goal_nearly_reached(&goal(dec!(-10), dec!(900), GoalStatus::InProgress)).is_none());
    }

    #[test]
    fn inactivity_boundary_is_strict() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let at_threshold = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        let past_threshold = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();

        assert!(!is_inactive(at_threshold, today, 2));
        assert!(is_inactive(past_threshold, today, 2));
        assert!(!is_inactive(today, today, 2));
    }

    #[test]
    fn recurring_message_uses_placeholder_without_description() {
        let tx = Transaction {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            kind: crate::transactions::TransactionKind::Expense,
            amount: dec!(9.99),
            category_id: None,
            group_id: None,
            description: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            is_fixed: false,
            is_installment: false,
            is_recurring: true,
            is_active: true,
            installment_number: None,
            installment_count: None,
            batch_id: Some("b1".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let msg = recurring_created(&tx);
        assert!(msg.body.contains("(no description)"));
        assert!(msg.body.contains("9.99"));
        assert!(msg.body.contains("2025-03-01"));
    }
}
