use serde::{Deserialize, Serialize};

use goalkeeper_domain::check_in::{CheckInOutcome, CheckInRecord, RewardItem, RewardKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardItemDto {
    pub kind: RewardKind,
    pub label: String,
    pub amount: i64,
}

impl From<&RewardItem> for RewardItemDto {
    fn from(item: &RewardItem) -> Self {
        Self {
            kind: item.kind,
            label: item.label.clone(),
            amount: item.amount,
        }
    }
}

/// Result of checking a goal off for today
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckGoalResultDto {
    pub goal_id: String,
    pub checked_at: String,
    pub current_streak: u32,
    pub total_streak: u32,
    pub rewards: Vec<RewardItemDto>,
    pub gained_cash: i64,
    pub gained_exp: u32,
    pub total_cash: i64,
    pub current_level: u32,
    pub current_exp: u32,
    pub is_level_up: bool,
    pub is_first_of_day: bool,
}

impl From<&CheckInOutcome> for CheckGoalResultDto {
    fn from(outcome: &CheckInOutcome) -> Self {
        Self {
            goal_id: outcome.goal_id.as_str().to_string(),
            checked_at: outcome.checked_at.to_rfc3339(),
            current_streak: outcome.current_streak,
            total_streak: outcome.total_streak,
            rewards: outcome.rewards.iter().map(RewardItemDto::from).collect(),
            gained_cash: outcome.gained_cash,
            gained_exp: outcome.gained_exp,
            total_cash: outcome.total_cash,
            current_level: outcome.current_level,
            current_exp: outcome.current_exp,
            is_level_up: outcome.is_level_up,
            is_first_of_day: outcome.is_first_of_day,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInRecordDto {
    pub id: String,
    pub goal_id: String,
    pub checked_at: String,
    pub check_in_date: String, // YYYY-MM-DD
    pub goal_streak: u32,
    pub total_streak: u32,
    pub gained_cash: i64,
    pub gained_exp: u32,
    pub is_first_of_day: bool,
    pub is_level_up: bool,
}

impl From<&CheckInRecord> for CheckInRecordDto {
    fn from(record: &CheckInRecord) -> Self {
        Self {
            id: record.id().as_str().to_string(),
            goal_id: record.goal_id().as_str().to_string(),
            checked_at: record.checked_at().to_rfc3339(),
            check_in_date: record.check_in_date().format("%Y-%m-%d").to_string(),
            goal_streak: record.goal_streak(),
            total_streak: record.total_streak(),
            gained_cash: record.gained_cash(),
            gained_exp: record.gained_exp(),
            is_first_of_day: record.is_first_of_day(),
            is_level_up: record.is_level_up(),
        }
    }
}
