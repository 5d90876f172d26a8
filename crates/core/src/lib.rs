//! PlanMore Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for PlanMore.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod categories;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod notifications;
pub mod settings;
pub mod transactions;
pub mod users;

// Re-export error types
pub use errors::DatabaseError;
pub use errors::Error;
pub use errors::Result;
