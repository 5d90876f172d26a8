//! Transactions module - domain models, series expansion, services, traits.

mod series;
mod transactions_errors;
mod transactions_model;
mod transactions_service;
mod transactions_traits;


pub use series::{expand, resolve_mode, SeriesMode};
pub use transactions_errors::TransactionError;
pub use transactions_model::{
    NewTransaction, NewTransactionRow, RecurrenceInterval, Transaction, TransactionKind,
    TransactionUpdate,
};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
