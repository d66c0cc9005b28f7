use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalStreakDto {
    pub goal_id: String,
    pub title: String,
    pub current_streak: u32,
    pub last_verified_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakSummaryDto {
    pub user_id: String,
    pub total_streak: u32,
    pub longest_streak: u32,
    pub total_check_ins: u64,
    pub total_check_in_days: u32,
    pub last_check_date: Option<String>, // YYYY-MM-DD, local day
    pub goals: Vec<GoalStreakDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInDayDto {
    pub date: String, // YYYY-MM-DD
    pub is_checked_in: bool,
    pub check_ins: u32,
    pub gained_cash: i64,
    pub gained_exp: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthStatsDto {
    pub total_days: u32,
    pub checked_in_days: u32,
    pub check_in_rate: f64, // percentage (0.0 - 100.0)
    pub total_check_ins: u32,
    pub total_cash: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInCalendarDto {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<CheckInDayDto>,
    pub month_stats: MonthStatsDto,
}
