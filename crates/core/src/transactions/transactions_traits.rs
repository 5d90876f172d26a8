use crate::transactions::transactions_model::{
    NewTransaction, NewTransactionRow, Transaction, TransactionUpdate,
};
use crate::Result;
use async_trait::async_trait;

/// Trait for transaction repository operations.
///
/// `insert_batch` must persist all rows atomically: a failure partway
/// through leaves no partial batch behind.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
    /// Most recent transaction by effective date, ties broken by creation
    /// timestamp. `None` when the user has no transactions.
    fn latest_for_user(&self, user_id: &str) -> Result<Option<Transaction>>;
    async fn insert_batch(&self, rows: Vec<NewTransactionRow>) -> Result<Vec<Transaction>>;
    async fn update_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
    async fn delete_batch(&self, user_id: &str, batch_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations. Every operation takes the
/// acting user explicitly; nothing is resolved from ambient state.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Expands the intent into one or more rows and persists them in a
    /// single atomic batch. Returns the full set of created rows.
    async fn create_transaction(
        &self,
        user_id: &str,
        intent: NewTransaction,
    ) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, user_id: &str, transaction_id: &str) -> Result<Transaction>;
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
    async fn update_transaction(
        &self,
        user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<usize>;
    /// Deletes every row sharing the batch id for this owner.
    async fn delete_batch(&self, user_id: &str, batch_id: &str) -> Result<usize>;
}
