use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::goal_handlers::find_owned_goal;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::goal_commands::*;
use crate::application::dtos::CheckGoalResultDto;
use goalkeeper_domain::check_in::{
    CheckInDomainService, CheckInRecord, CheckInRepository, RewardPolicy,
};
use goalkeeper_domain::goal::GoalRepository;
use goalkeeper_domain::shared::{Clock, DayBoundary, DomainError, UserId};
use goalkeeper_domain::user::UserRepository;

/// Check goal command handler
///
/// Runs the streak and reward rules against the stored goal and user, then
/// writes goal, user and the history row in one transaction.
pub struct CheckGoalCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    goal_repo: Arc<dyn GoalRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
    boundary: DayBoundary,
    policy: RewardPolicy,
}

impl CheckGoalCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        goal_repo: Arc<dyn GoalRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        clock: Arc<dyn Clock>,
        boundary: DayBoundary,
        policy: RewardPolicy,
    ) -> Self {
        Self {
            user_repo,
            goal_repo,
            check_in_repo,
            clock,
            boundary,
            policy,
        }
    }
}

#[async_trait]
impl CommandHandler<CheckGoalCommand> for CheckGoalCommandHandler {
    type Result = CheckGoalResult;

    async fn handle(&self, cmd: CheckGoalCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling CheckGoalCommand: user={} goal={}",
            cmd.user_id, cmd.goal_id
        );

        // 1. Load both aggregates
        let mut user = self
            .user_repo
            .find_by_id(&UserId::from_string(&cmd.user_id))
            .await?
            .ok_or_else(|| DomainError::UserNotFound(cmd.user_id.clone()))?;
        let mut goal =
            find_owned_goal(self.goal_repo.as_ref(), &cmd.goal_id, &cmd.user_id).await?;

        // 2. Apply streak and reward rules
        let now = self.clock.now();
        let outcome = CheckInDomainService::check_in(
            &mut goal,
            &mut user,
            now,
            &self.boundary,
            &self.policy,
        )?;

        // 3. Persist atomically
        let record =
            CheckInRecord::from_outcome(user.id().clone(), self.boundary.date_of(now), &outcome);
        self.check_in_repo.commit(&goal, &user, &record).await?;

        info!(
            "Goal checked: goal={} streak={} total_streak={} cash=+{} level_up={}",
            goal.id(),
            outcome.current_streak,
            outcome.total_streak,
            outcome.gained_cash,
            outcome.is_level_up
        );

        Ok(CheckGoalResultDto::from(&outcome))
    }
}
