use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::Result;
use async_trait::async_trait;

/// Trait for goal repository operations.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn load_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    /// All in-progress goals across users; candidate set for the
    /// goal-nearly-reached sweep.
    fn load_in_progress_goals(&self) -> Result<Vec<Goal>>;
    async fn insert_new_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, user_id: &str, goal_update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<usize>;
}
