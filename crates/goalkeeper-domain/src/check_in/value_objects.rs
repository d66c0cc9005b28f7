use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, GoalId};

/// Reward amounts granted by a goal check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    /// Cash for every successful check-in
    pub base_cash: i64,
    /// Exp for every successful check-in
    pub base_exp: u32,
    /// Cash per day of account-wide streak, paid on the first check-in of a day
    pub streak_cash_per_day: i64,
    /// Flat cash for the first check-in of a day
    pub first_of_day_cash: i64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            base_cash: 100,
            base_exp: 20,
            streak_cash_per_day: 100,
            first_of_day_cash: 200,
        }
    }
}

impl RewardPolicy {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.base_cash < 0 || self.streak_cash_per_day < 0 || self.first_of_day_cash < 0 {
            return Err(DomainError::Validation(
                "Reward amounts cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Base,
    StreakBonus,
    FirstOfDayBonus,
}

/// One line of the itemized reward breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    pub kind: RewardKind,
    pub label: String,
    pub amount: i64,
}

impl RewardItem {
    pub fn base(amount: i64) -> Self {
        Self {
            kind: RewardKind::Base,
            label: "Goal completed".to_string(),
            amount,
        }
    }

    pub fn streak_bonus(streak: u32, amount: i64) -> Self {
        Self {
            kind: RewardKind::StreakBonus,
            label: format!("{streak}-day streak bonus"),
            amount,
        }
    }

    pub fn first_of_day(amount: i64) -> Self {
        Self {
            kind: RewardKind::FirstOfDayBonus,
            label: "First goal of the day".to_string(),
            amount,
        }
    }
}

/// Result of a successful goal check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInOutcome {
    pub goal_id: GoalId,
    pub checked_at: DateTime<Utc>,
    pub current_streak: u32,
    pub total_streak: u32,
    pub rewards: Vec<RewardItem>,
    pub gained_cash: i64,
    pub gained_exp: u32,
    pub total_cash: i64,
    pub current_level: u32,
    pub current_exp: u32,
    pub is_level_up: bool,
    pub is_first_of_day: bool,
}
