use chrono::{DateTime, Utc};

use crate::application::commands::command_handler::Command;
use crate::application::dtos::{CheckGoalResultDto, GoalDto};
use goalkeeper_domain::goal::GoalPeriod;

// ============================================================
// Create Goal Command
// ============================================================

#[derive(Debug, Clone)]
pub struct CreateGoalCommand {
    pub user_id: String,
    pub title: String,
    pub category: String,
    pub period: Option<GoalPeriod>,
    pub memo: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Command for CreateGoalCommand {}

pub type CreateGoalResult = GoalDto;

// ============================================================
// Update Goal Command
// ============================================================

/// Partial update: `None` leaves a field as is; an empty memo clears it
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalCommand {
    pub user_id: String,
    pub goal_id: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub period: Option<GoalPeriod>,
    pub memo: Option<String>,
    pub is_completed: Option<bool>,
    pub due_date: Option<DateTime<Utc>>,
}

impl Command for UpdateGoalCommand {}

pub type UpdateGoalResult = GoalDto;

// ============================================================
// Delete Goal Command
// ============================================================

#[derive(Debug, Clone)]
pub struct DeleteGoalCommand {
    pub user_id: String,
    pub goal_id: String,
}

impl Command for DeleteGoalCommand {}

pub type DeleteGoalResult = ();

// ============================================================
// Check Goal Command
// ============================================================

#[derive(Debug, Clone)]
pub struct CheckGoalCommand {
    pub user_id: String,
    pub goal_id: String,
}

impl Command for CheckGoalCommand {}

pub type CheckGoalResult = CheckGoalResultDto;
