use crate::notifications::notifications_model::{DispatchReport, NotificationMessage};
use crate::transactions::Transaction;
use crate::Result;
use async_trait::async_trait;

/// Outbound email channel. Delivery is best-effort: callers log failures
/// and never propagate them past the dispatch boundary.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

/// Outbound chat-bot channel. Never errors: a failed or unconfigured send
/// simply returns `false`.
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> bool;
}

/// Trait for the notification policy engine.
#[async_trait]
pub trait NotificationServiceTrait: Send + Sync {
    /// Delivers one message over every channel the user's preferences
    /// enable. Channels are attempted independently; one channel's failure
    /// never blocks the other.
    async fn dispatch(
        &self,
        user_id: &str,
        message: &NotificationMessage,
    ) -> Result<DispatchReport>;

    /// Sweep over all in-progress goals; returns how many alerts were
    /// dispatched. Re-running re-sends for goals still under the threshold.
    async fn check_goal_notifications(&self) -> Result<usize>;

    /// Sweep over all users; returns how many inactivity reminders were
    /// dispatched. Users without any transactions never fire.
    async fn check_inactive_users(&self) -> Result<usize>;

    /// Per-row hook fired when a recurring series row is created.
    /// Installment rows are never notified.
    async fn notify_recurring_created(
        &self,
        user_id: &str,
        transaction: &Transaction,
    ) -> Result<DispatchReport>;
}
