use std::sync::Arc;

use crate::categories::categories_model::{Category, Group, NewCategory, NewGroup};
use crate::categories::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{DatabaseError, Error, ValidationError};
use crate::Result;
use async_trait::async_trait;

/// Service for managing categories and groups.
pub struct CategoryService {
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService {
            category_repository,
        }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn ensure_category_owned(&self, user_id: &str, category_id: &str) -> Result<()> {
        match self.category_repository.get_category(user_id, category_id) {
            Ok(_) => Ok(()),
            Err(Error::Database(DatabaseError::NotFound(_))) => Err(Error::Forbidden(format!(
                "Category {} does not belong to user {}",
                category_id, user_id
            ))),
            Err(e) => Err(e),
        }
    }

    fn ensure_group_owned(&self, user_id: &str, group_id: &str) -> Result<()> {
        match self.category_repository.get_group(user_id, group_id) {
            Ok(_) => Ok(()),
            Err(Error::Database(DatabaseError::NotFound(_))) => Err(Error::Forbidden(format!(
                "Group {} does not belong to user {}",
                group_id, user_id
            ))),
            Err(e) => Err(e),
        }
    }

    fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.category_repository.list_categories(user_id)
    }

    fn list_groups(&self, user_id: &str) -> Result<Vec<Group>> {
        self.category_repository.list_groups(user_id)
    }

    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category> {
        if new_category.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.category_repository
            .insert_category(user_id, new_category)
            .await
    }

    async fn create_group(&self, user_id: &str, new_group: NewGroup) -> Result<Group> {
        if new_group.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        self.category_repository.insert_group(user_id, new_group).await
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize> {
        self.category_repository
            .delete_category(user_id, category_id)
            .await
    }

    async fn delete_group(&self, user_id: &str, group_id: &str) -> Result<usize> {
        self.category_repository.delete_group(user_id, group_id).await
    }
}
