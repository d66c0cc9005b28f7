use async_trait::async_trait;

use super::Goal;
use crate::shared::{DomainError, GoalId, UserId};

#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Insert or update a goal
    async fn save(&self, goal: &Goal) -> Result<(), DomainError>;

    /// Find a goal only if it belongs to `owner`
    async fn find_owned(&self, id: &GoalId, owner: &UserId) -> Result<Option<Goal>, DomainError>;

    /// All goals of a user, newest first
    async fn find_by_user(&self, owner: &UserId) -> Result<Vec<Goal>, DomainError>;

    async fn delete(&self, id: &GoalId) -> Result<(), DomainError>;
}
