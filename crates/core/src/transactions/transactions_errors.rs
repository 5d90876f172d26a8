//! Transaction domain errors.

use thiserror::Error;

/// Errors raised while validating or expanding a transaction intent.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid installment count: {0}")]
    InvalidInstallmentCount(String),

    #[error("Invalid recurrence interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Transaction not found: {0}")]
    NotFound(String),

    #[error("Invalid transaction data: {0}")]
    InvalidData(String),
}
