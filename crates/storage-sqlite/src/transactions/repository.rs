use planmore_core::transactions::{
    NewTransactionRow, Transaction, TransactionRepositoryTrait, TransactionUpdate,
};
use planmore_core::{DatabaseError, Error, Result};

use super::model::TransactionDB;
use crate::convert::{format_date, format_datetime};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, for_user_id: &str, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let db = transactions
            .filter(id.eq(transaction_id))
            .filter(user_id.eq(for_user_id))
            .first::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Transaction::from(db))
    }

    fn list_transactions(&self, for_user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions
            .filter(user_id.eq(for_user_id))
            .order((date.desc(), created_at.desc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn latest_for_user(&self, for_user_id: &str) -> Result<Option<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let latest = transactions
            .filter(user_id.eq(for_user_id))
            .order((date.desc(), created_at.desc()))
            .first::<TransactionDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(latest.map(Transaction::from))
    }

    async fn insert_batch(&self, rows: Vec<NewTransactionRow>) -> Result<Vec<Transaction>> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Vec<Transaction>> {
                    // One writer job is one transaction: either every row of
                    // the series lands or none does.
                    let db_rows: Vec<TransactionDB> =
                        rows.into_iter().map(TransactionDB::from).collect();
                    diesel::insert_into(transactions::table)
                        .values(&db_rows)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                    Ok(db_rows.into_iter().map(Transaction::from).collect())
                },
            )
            .await
    }

    async fn update_transaction(
        &self,
        for_user_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let owner_id = for_user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let affected = diesel::update(
                    transactions
                        .filter(id.eq(&update.id))
                        .filter(user_id.eq(&owner_id)),
                )
                .set((
                    kind.eq(update.kind.as_str()),
                    amount.eq(update.amount.to_string()),
                    category_id.eq(update.category_id.clone()),
                    group_id.eq(update.group_id.clone()),
                    description.eq(update.description.clone()),
                    date.eq(format_date(update.date)),
                    is_fixed.eq(update.is_fixed),
                    is_active.eq(update.is_active),
                    updated_at.eq(format_datetime(Utc::now())),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Transaction {} not found",
                        update.id
                    ))));
                }

                let db = transactions
                    .filter(id.eq(&update.id))
                    .first::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::from(db))
            })
            .await
    }

    async fn delete_transaction(&self, for_user_id: &str, transaction_id: &str) -> Result<usize> {
        let owner_id = for_user_id.to_string();
        let target_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    transactions
                        .filter(id.eq(target_id))
                        .filter(user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    async fn delete_batch(&self, for_user_id: &str, batch: &str) -> Result<usize> {
        let owner_id = for_user_id.to_string();
        let batch = batch.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    transactions
                        .filter(batch_id.eq(batch))
                        .filter(user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
