use planmore_core::categories::{
    Category, CategoryRepositoryTrait, Group, NewCategory, NewGroup,
};
use planmore_core::Result;

use super::model::{CategoryDB, GroupDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, groups};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_category(&self, for_user_id: &str, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        let db = categories::table
            .filter(categories::id.eq(category_id))
            .filter(categories::user_id.eq(for_user_id))
            .first::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Category::from(db))
    }

    fn list_categories(&self, for_user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::user_id.eq(for_user_id))
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn insert_category(
        &self,
        for_user_id: &str,
        new_category: NewCategory,
    ) -> Result<Category> {
        let owner_id = for_user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let db = CategoryDB::from_new(&owner_id, new_category.name);
                let result_db = diesel::insert_into(categories::table)
                    .values(&db)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(result_db))
            })
            .await
    }

    async fn delete_category(&self, for_user_id: &str, category_id: &str) -> Result<usize> {
        let owner_id = for_user_id.to_string();
        let target_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    categories::table
                        .filter(categories::id.eq(target_id))
                        .filter(categories::user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }

    fn get_group(&self, for_user_id: &str, group_id: &str) -> Result<Group> {
        let mut conn = get_connection(&self.pool)?;
        let db = groups::table
            .filter(groups::id.eq(group_id))
            .filter(groups::user_id.eq(for_user_id))
            .first::<GroupDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Group::from(db))
    }

    fn list_groups(&self, for_user_id: &str) -> Result<Vec<Group>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = groups::table
            .filter(groups::user_id.eq(for_user_id))
            .order(groups::name.asc())
            .load::<GroupDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Group::from).collect())
    }

    async fn insert_group(&self, for_user_id: &str, new_group: NewGroup) -> Result<Group> {
        let owner_id = for_user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Group> {
                let db = GroupDB::from_new(&owner_id, new_group.name);
                let result_db = diesel::insert_into(groups::table)
                    .values(&db)
                    .returning(GroupDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Group::from(result_db))
            })
            .await
    }

    async fn delete_group(&self, for_user_id: &str, group_id: &str) -> Result<usize> {
        let owner_id = for_user_id.to_string();
        let target_id = group_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    groups::table
                        .filter(groups::id.eq(target_id))
                        .filter(groups::user_id.eq(owner_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
