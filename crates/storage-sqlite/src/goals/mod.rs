//! SQLite storage implementation for goals.

mod model;
mod repository;

pub use model::GoalDB;
pub use repository::GoalRepository;

// Re-export trait from core for convenience
pub use planmore_core::goals::GoalRepositoryTrait;
