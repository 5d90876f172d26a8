use log::{debug, warn};
use std::sync::Arc;

use crate::categories::CategoryServiceTrait;
use crate::notifications::NotificationServiceTrait;
use crate::transactions::series;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionUpdate};
use crate::transactions::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::Result;
use async_trait::async_trait;

/// Service for managing transactions and expanding series intents.
pub struct TransactionService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_service: Arc<dyn CategoryServiceTrait>,
    notification_service: Option<Arc<dyn NotificationServiceTrait>>,
}

impl TransactionService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_service: Arc<dyn CategoryServiceTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            category_service,
            notification_service: None,
        }
    }

    /// Attaches the notification hook fired after recurring rows are
    /// created. Without it, creation works but stays silent.
    pub fn with_notifications(
        mut self,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        self.notification_service = Some(notification_service);
        self
    }

    /// Ownership checks for the referenced category/group. Runs before any
    /// row is generated so an invalid intent has no partial effects.
    fn validate_references(
        &self,
        user_id: &str,
        category_id: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<()> {
        if let Some(category_id) = category_id {
            self.category_service
                .ensure_category_owned(user_id, category_id)?;
        }
        if let Some(group_id) = group_id {
            self.category_service.ensure_group_owned(user_id, group_id)?;
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        user_id: &str,
        intent: NewTransaction,
    ) -> Result<Vec<Transaction>> {
        self.validate_references(
            user_id,
            intent.category_id.as_deref(),
            intent.group_id.as_deref(),
        )?;

        let rows = series::expand(user_id, &intent)?;
        debug!(
            "Expanding transaction intent for user {} into {} row(s)",
            user_id,
            rows.len()
        );

        let created = self.transaction_repository.insert_batch(rows).await?;

        if let Some(notifier) = &self.notification_service {
            for row in created.iter().filter(|t| t.is_recurring) {
                // Best-effort: a delivery failure never fails the creation.
                if let Err(e) = notifier.notify_recurring_created(user_id, row).await {
                    warn!(
                        "Recurring-creation notification for user {} failed: {}",
                        user_id, e
                    );
                }
            }
        }

        Ok(created)
    }

    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction> {
        self.transaction_repository
            .get_transaction(user_id, transaction_id)
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.transaction_repository.list_transactions(user_id)
    }

    async fn update_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        self.validate_references(
            user_id,
            update.category_id.as_deref(),
            update.group_id.as_deref(),
        )?;
        self.transaction_repository
            .update_transaction(user_id, update)
            .await
    }

    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize> {
        self.transaction_repository
            .delete_transaction(user_id, transaction_id)
            .await
    }

    async fn delete_batch(&self, user_id: &str, batch_id: &str) -> Result<usize> {
        self.transaction_repository
            .delete_batch(user_id, batch_id)
            .await
    }
}
