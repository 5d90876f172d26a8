use planmore_core::users::{User, UserRepositoryTrait};
use planmore_core::Result;

use super::model::UserDB;
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::users::dsl::*;
use diesel::prelude::*;
use std::sync::Arc;

/// Read-only view over the user registry. Account management lives outside
/// this crate; the engine only needs identities and email addresses.
pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        UserRepository { pool }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn get_user(&self, for_user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let db = users
            .find(for_user_id)
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(User::from(db))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users
            .order(created_at.asc())
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
