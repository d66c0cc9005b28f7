use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::goal_commands::*;
use crate::application::dtos::GoalDto;
use goalkeeper_domain::goal::{Goal, GoalRepository};
use goalkeeper_domain::shared::{DomainError, GoalId, UserId};
use goalkeeper_domain::user::UserRepository;

/// Load a goal the caller owns; someone else's goal reads as missing
pub(super) async fn find_owned_goal(
    goal_repo: &dyn GoalRepository,
    goal_id: &str,
    user_id: &str,
) -> Result<Goal, DomainError> {
    goal_repo
        .find_owned(&GoalId::from_string(goal_id), &UserId::from_string(user_id))
        .await?
        .ok_or_else(|| DomainError::GoalNotFound(goal_id.to_string()))
}

/// Create goal command handler
pub struct CreateGoalCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    goal_repo: Arc<dyn GoalRepository>,
}

impl CreateGoalCommandHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>, goal_repo: Arc<dyn GoalRepository>) -> Self {
        Self {
            user_repo,
            goal_repo,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateGoalCommand> for CreateGoalCommandHandler {
    type Result = CreateGoalResult;

    async fn handle(&self, cmd: CreateGoalCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CreateGoalCommand for user: {}", cmd.user_id);

        let user_id = UserId::from_string(&cmd.user_id);
        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(DomainError::UserNotFound(cmd.user_id));
        }

        let goal = Goal::new(
            user_id,
            cmd.title,
            cmd.category,
            cmd.period.unwrap_or_default(),
            cmd.memo,
            cmd.due_date,
        )?;
        self.goal_repo.save(&goal).await?;

        info!("Goal created: {} ({})", goal.title(), goal.id());
        Ok(GoalDto::from(&goal))
    }
}

/// Update goal command handler
pub struct UpdateGoalCommandHandler {
    goal_repo: Arc<dyn GoalRepository>,
}

impl UpdateGoalCommandHandler {
    pub fn new(goal_repo: Arc<dyn GoalRepository>) -> Self {
        Self { goal_repo }
    }
}

#[async_trait]
impl CommandHandler<UpdateGoalCommand> for UpdateGoalCommandHandler {
    type Result = UpdateGoalResult;

    async fn handle(&self, cmd: UpdateGoalCommand) -> Result<Self::Result, DomainError> {
        info!("Handling UpdateGoalCommand for goal: {}", cmd.goal_id);

        let mut goal = find_owned_goal(self.goal_repo.as_ref(), &cmd.goal_id, &cmd.user_id).await?;

        if let Some(title) = cmd.title {
            goal.rename(title)?;
        }
        if let Some(category) = cmd.category {
            goal.recategorize(category)?;
        }
        if let Some(period) = cmd.period {
            goal.change_period(period);
        }
        if let Some(memo) = cmd.memo {
            goal.update_memo(Some(memo));
        }
        if let Some(is_completed) = cmd.is_completed {
            goal.set_completed(is_completed);
        }
        if let Some(due_date) = cmd.due_date {
            goal.update_due_date(Some(due_date));
        }

        self.goal_repo.save(&goal).await?;

        Ok(GoalDto::from(&goal))
    }
}

/// Delete goal command handler
pub struct DeleteGoalCommandHandler {
    goal_repo: Arc<dyn GoalRepository>,
}

impl DeleteGoalCommandHandler {
    pub fn new(goal_repo: Arc<dyn GoalRepository>) -> Self {
        Self { goal_repo }
    }
}

#[async_trait]
impl CommandHandler<DeleteGoalCommand> for DeleteGoalCommandHandler {
    type Result = DeleteGoalResult;

    async fn handle(&self, cmd: DeleteGoalCommand) -> Result<Self::Result, DomainError> {
        info!("Handling DeleteGoalCommand for goal: {}", cmd.goal_id);

        let goal = find_owned_goal(self.goal_repo.as_ref(), &cmd.goal_id, &cmd.user_id).await?;
        self.goal_repo.delete(goal.id()).await?;

        info!("Goal deleted: {}", cmd.goal_id);
        Ok(())
    }
}
