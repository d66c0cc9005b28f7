use serde::{Deserialize, Serialize};

use goalkeeper_domain::goal::Goal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDto {
    pub id: String,
    pub title: String,
    pub category: String,
    pub period: String,
    pub memo: Option<String>,
    pub created_at: String,
    pub due_date: Option<String>,
    pub is_completed: bool,
    pub current_streak: u32,
    pub last_verified_at: Option<String>,
}

impl From<&Goal> for GoalDto {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id().as_str().to_string(),
            title: goal.title().to_string(),
            category: goal.category().to_string(),
            period: goal.period().as_str().to_string(),
            memo: goal.memo().map(str::to_string),
            created_at: goal.created_at().to_rfc3339(),
            due_date: goal.due_date().map(|d| d.to_rfc3339()),
            is_completed: goal.is_completed(),
            current_streak: goal.current_streak(),
            last_verified_at: goal.last_verified_at().map(|d| d.to_rfc3339()),
        }
    }
}
