use planmore_core::goals::{Goal, GoalRepositoryTrait, GoalStatus, GoalUpdate, NewGoal};
use planmore_core::{DatabaseError, Error, Result};

use super::model::GoalDB;
use crate::convert::{format_date, format_datetime};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goals;
use crate::schema::goals::dsl::*;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, for_user_id: &str, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        let db = goals
            .filter(id.eq(goal_id))
            .filter(user_id.eq(for_user_id))
            .first::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Goal::from(db))
    }

    fn load_goals(&self, for_user_id: &str) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals
            .filter(user_id.eq(for_user_id))
            .order(created_at.asc())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn load_in_progress_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals
            .filter(status.eq(GoalStatus::InProgress.as_str()))
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    async fn insert_new_goal(&self, for_user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        let owner_id = for_user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_db = GoalDB::from_new_goal(&owner_id, new_goal);
                let result_db = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn update_goal(&self, for_user_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        let owner_id = for_user_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let affected = diesel::update(
                    goals
                        .filter(id.eq(&goal_update.id))
                        .filter(user_id.eq(&owner_id)),
                )
                .set((
                    name.eq(&goal_update.name),
                    target_amount.eq(goal_update.target_amount.to_string()),
                    current_amount.eq(goal_update.current_amount.to_string()),
                    deadline.eq(goal_update.deadline.map(format_date)),
                    status.eq(goal_update.status.as_str()),
                    updated_at.eq(format_datetime(Utc::now())),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if affected == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Goal {} not found",
                        goal_update.id
                    ))));
                }

                let result_db = goals
                    .filter(id.eq(&goal_update.id))
                    .first::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn delete_goal(&self, for_user_id: &str, goal_id: &str) -> Result<usize> {
        let owner_id = for_user_id.to_string();
        let target_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(goals.filter(id.eq(target_id)).filter(user_id.eq(owner_id)))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }
}
