use std::sync::Arc;

use crate::application::dtos::GoalDto;
use goalkeeper_domain::goal::GoalRepository;
use goalkeeper_domain::shared::{DomainError, GoalId, UserId};

pub struct GoalQueryService {
    goal_repo: Arc<dyn GoalRepository>,
}

impl GoalQueryService {
    pub fn new(goal_repo: Arc<dyn GoalRepository>) -> Self {
        Self { goal_repo }
    }

    /// The caller's goals, newest first
    pub async fn list_goals(&self, user_id: &str) -> Result<Vec<GoalDto>, DomainError> {
        let goals = self
            .goal_repo
            .find_by_user(&UserId::from_string(user_id))
            .await?;

        Ok(goals.iter().map(GoalDto::from).collect())
    }

    pub async fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalDto, DomainError> {
        let goal = self
            .goal_repo
            .find_owned(&GoalId::from_string(goal_id), &UserId::from_string(user_id))
            .await?
            .ok_or_else(|| DomainError::GoalNotFound(goal_id.to_string()))?;

        Ok(GoalDto::from(&goal))
    }
}
