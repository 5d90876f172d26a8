//! Users module - domain model and repository trait.

mod users_model;
mod users_traits;

pub use users_model::User;
pub use users_traits::UserRepositoryTrait;
