use crate::users::users_model::User;
use crate::Result;

/// Trait for user repository operations.
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn list_users(&self) -> Result<Vec<User>>;
}
