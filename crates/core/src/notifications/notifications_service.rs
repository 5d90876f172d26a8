use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;

use crate::goals::GoalRepositoryTrait;
use crate::notifications::notifications_model::{DispatchReport, NotificationMessage};
use crate::notifications::policy;
use crate::notifications::{ChatSender, EmailSender, NotificationServiceTrait};
use crate::settings::SettingsRepositoryTrait;
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::users::UserRepositoryTrait;
use crate::Result;
use async_trait::async_trait;

/// The notification policy engine: evaluates per-user state against
/// channel preferences and performs best-effort delivery.
///
/// Stateless across calls; sweeps carry no dedupe state, so a condition
/// that still holds on the next run is re-notified.
pub struct NotificationService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    email_sender: Arc<dyn EmailSender>,
    chat_sender: Arc<dyn ChatSender>,
    inactivity_threshold_days: i64,
}

impl NotificationService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        settings_repository: Arc<dyn SettingsRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        email_sender: Arc<dyn EmailSender>,
        chat_sender: Arc<dyn ChatSender>,
        inactivity_threshold_days: i64,
    ) -> Self {
        Self {
            user_repository,
            settings_repository,
            goal_repository,
            transaction_repository,
            email_sender,
            chat_sender,
            inactivity_threshold_days,
        }
    }
}

#[async_trait]
impl NotificationServiceTrait for NotificationService {
    async fn dispatch(
        &self,
        user_id: &str,
        message: &NotificationMessage,
    ) -> Result<DispatchReport> {
        let settings = self.settings_repository.get_settings(user_id)?;
        let mut report = DispatchReport::default();

        if settings.email_notifications {
            match self.user_repository.get_user(user_id) {
                Ok(user) if !user.email.is_empty() => {
                    report.email_attempted = true;
                    match self
                        .email_sender
                        .send(&user.email, &message.subject, &message.body)
                        .await
                    {
                        Ok(()) => report.email_delivered = true,
                        Err(e) => {
                            warn!("Email delivery to user {} failed: {}", user_id, e);
                        }
                    }
                }
                Ok(_) => {
                    debug!("User {} has no email address, skipping email channel", user_id);
                }
                Err(e) => {
                    warn!("Could not load user {} for email channel: {}", user_id, e);
                }
            }
        }

        if settings.chat_channel_ready() {
            // chat_channel_ready guarantees the id is present
            if let Some(chat_id) = settings.telegram_chat_id.as_deref() {
                report.chat_attempted = true;
                report.chat_delivered = self.chat_sender.send(chat_id, &message.body).await;
                if !report.chat_delivered {
                    warn!("Chat delivery to user {} failed", user_id);
                }
            }
        }

        Ok(report)
    }

    async fn check_goal_notifications(&self) -> Result<usize> {
        let goals = self.goal_repository.load_in_progress_goals()?;
        let mut dispatched = 0;

        for goal in &goals {
            let Some(message) = policy::goal_nearly_reached(goal) else {
                continue;
            };
            match self.dispatch(&goal.user_id, &message).await {
                Ok(report) if report.attempted_any() => dispatched += 1,
                Ok(_) => {}
                Err(e) => {
                    // One bad candidate must not abort the sweep.
                    warn!(
                        "Goal notification for user {} (goal {}) failed: {}",
                        goal.user_id, goal.id, e
                    );
                }
            }
        }

        debug!(
            "Goal sweep: {} of {} in-progress goals notified",
            dispatched,
            goals.len()
        );
        Ok(dispatched)
    }

    async fn check_inactive_users(&self) -> Result<usize> {
        let users = self.user_repository.list_users()?;
        let today = Utc::now().date_naive();
        let mut dispatched = 0;

        for user in &users {
            let settings = match self.settings_repository.get_settings(&user.id) {
                Ok(s) => s,
                Err(e) => {
                    warn!("Could not load settings for user {}: {}", user.id, e);
                    continue;
                }
            };
            if !settings.any_channel_enabled() {
                continue;
            }

            let latest = match self.transaction_repository.latest_for_user(&user.id) {
                Ok(latest) => latest,
                Err(e) => {
                    warn!("Could not load latest transaction for user {}: {}", user.id, e);
                    continue;
                }
            };
            // No transactions at all means no baseline to measure against.
            let Some(latest) = latest else {
                continue;
            };

            if !policy::is_inactive(latest.date, today, self.inactivity_threshold_days) {
                continue;
            }

            let message = policy::inactivity_reminder(self.inactivity_threshold_days);
            match self.dispatch(&user.id, &message).await {
                Ok(report) if report.attempted_any() => dispatched += 1,
                Ok(_) => {}
                Err(e) => {
                    warn!("Inactivity notification for user {} failed: {}", user.id, e);
                }
            }
        }

        debug!(
            "Inactivity sweep: {} of {} users notified",
            dispatched,
            users.len()
        );
        Ok(dispatched)
    }

    async fn notify_recurring_created(
        &self,
        user_id: &str,
        transaction: &Transaction,
    ) -> Result<DispatchReport> {
        if !transaction.is_recurring || transaction.is_installment {
            return Ok(DispatchReport::default());
        }
        let message = policy::recurring_created(transaction);
        self.dispatch(user_id, &message).await
    }
}
