//! SQLite storage implementation for categories and groups.

mod model;
mod repository;

pub use model::{CategoryDB, GroupDB};
pub use repository::CategoryRepository;

// Re-export trait from core for convenience
pub use planmore_core::categories::CategoryRepositoryTrait;
