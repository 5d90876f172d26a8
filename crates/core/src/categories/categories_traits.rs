use crate::categories::categories_model::{Category, Group, NewCategory, NewGroup};
use crate::Result;
use async_trait::async_trait;

/// Trait for category/group repository operations.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category>;
    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;
    async fn insert_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize>;

    fn get_group(&self, user_id: &str, group_id: &str) -> Result<Group>;
    fn list_groups(&self, user_id: &str) -> Result<Vec<Group>>;
    async fn insert_group(&self, user_id: &str, new_group: NewGroup) -> Result<Group>;
    async fn delete_group(&self, user_id: &str, group_id: &str) -> Result<usize>;
}

/// Trait for category service operations.
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Fails with `Error::Forbidden` when the category does not exist or
    /// belongs to a different user.
    fn ensure_category_owned(&self, user_id: &str, category_id: &str) -> Result<()>;
    fn ensure_group_owned(&self, user_id: &str, group_id: &str) -> Result<()>;
    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>>;
    fn list_groups(&self, user_id: &str) -> Result<Vec<Group>>;
    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;
    async fn create_group(&self, user_id: &str, new_group: NewGroup) -> Result<Group>;
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize>;
    async fn delete_group(&self, user_id: &str, group_id: &str) -> Result<usize>;
}
