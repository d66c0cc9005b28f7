use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::CheckInOutcome;
use crate::shared::{CheckInId, GoalId, UserId};

/// History row written alongside every successful check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRecord {
    id: CheckInId,
    goal_id: GoalId,
    user_id: UserId,
    checked_at: DateTime<Utc>,
    check_in_date: NaiveDate,
    goal_streak: u32,
    total_streak: u32,
    gained_cash: i64,
    gained_exp: u32,
    is_first_of_day: bool,
    is_level_up: bool,
}

impl CheckInRecord {
    pub fn from_outcome(user_id: UserId, check_in_date: NaiveDate, outcome: &CheckInOutcome) -> Self {
        Self {
            id: CheckInId::new(),
            goal_id: outcome.goal_id.clone(),
            user_id,
            checked_at: outcome.checked_at,
            check_in_date,
            goal_streak: outcome.current_streak,
            total_streak: outcome.total_streak,
            gained_cash: outcome.gained_cash,
            gained_exp: outcome.gained_exp,
            is_first_of_day: outcome.is_first_of_day,
            is_level_up: outcome.is_level_up,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: CheckInId,
        goal_id: GoalId,
        user_id: UserId,
        checked_at: DateTime<Utc>,
        check_in_date: NaiveDate,
        goal_streak: u32,
        total_streak: u32,
        gained_cash: i64,
        gained_exp: u32,
        is_first_of_day: bool,
        is_level_up: bool,
    ) -> Self {
        Self {
            id,
            goal_id,
            user_id,
            checked_at,
            check_in_date,
            goal_streak,
            total_streak,
            gained_cash,
            gained_exp,
            is_first_of_day,
            is_level_up,
        }
    }

    pub fn id(&self) -> &CheckInId {
        &self.id
    }

    pub fn goal_id(&self) -> &GoalId {
        &self.goal_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }

    /// Calendar day the check-in counted for
    pub fn check_in_date(&self) -> NaiveDate {
        self.check_in_date
    }

    pub fn goal_streak(&self) -> u32 {
        self.goal_streak
    }

    pub fn total_streak(&self) -> u32 {
        self.total_streak
    }

    pub fn gained_cash(&self) -> i64 {
        self.gained_cash
    }

    pub fn gained_exp(&self) -> u32 {
        self.gained_exp
    }

    pub fn is_first_of_day(&self) -> bool {
        self.is_first_of_day
    }

    pub fn is_level_up(&self) -> bool {
        self.is_level_up
    }
}

/// Per-day rollup of check-in history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInDaySummary {
    pub date: NaiveDate,
    pub check_ins: u32,
    pub gained_cash: i64,
    pub gained_exp: u32,
}
