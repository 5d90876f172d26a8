use rust_decimal::Decimal;
use std::sync::Arc;

use crate::errors::ValidationError;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::goals::{GoalRepositoryTrait, GoalServiceTrait};
use crate::Result;
use async_trait::async_trait;

/// Service for managing savings goals.
pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl GoalService {
    pub fn new(goal_repository: Arc<dyn GoalRepositoryTrait>) -> Self {
        GoalService { goal_repository }
    }

    fn validate_target(target_amount: Decimal) -> Result<()> {
        if target_amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Goal target amount must be positive, got {}",
                target_amount
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.goal_repository.get_goal(user_id, goal_id)
    }

    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.goal_repository.load_goals(user_id)
    }

    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        Self::validate_target(new_goal.target_amount)?;
        self.goal_repository.insert_new_goal(user_id, new_goal).await
    }

    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal> {
        Self::validate_target(goal_update.target_amount)?;
        self.goal_repository.update_goal(user_id, goal_update).await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize> {
        self.goal_repository.delete_goal(user_id, goal_id).await
    }
}
