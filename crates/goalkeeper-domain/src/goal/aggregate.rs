use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::GoalPeriod;
use crate::shared::{DayBoundary, DomainError, GoalId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    id: GoalId,
    user_id: UserId,
    title: String,
    category: String,
    period: GoalPeriod,
    memo: Option<String>,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    is_completed: bool,
    current_streak: u32,
    last_verified_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn new(
        user_id: UserId,
        title: String,
        category: String,
        period: GoalPeriod,
        memo: Option<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: GoalId::new(),
            user_id,
            title: Self::validate_text("Goal title", title)?,
            category: Self::validate_text("Goal category", category)?,
            period,
            memo: memo.filter(|m| !m.trim().is_empty()),
            created_at: Utc::now(),
            due_date,
            is_completed: false,
            current_streak: 0,
            last_verified_at: None,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: GoalId,
        user_id: UserId,
        title: String,
        category: String,
        period: GoalPeriod,
        memo: Option<String>,
        created_at: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
        is_completed: bool,
        current_streak: u32,
        last_verified_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            category,
            period,
            memo,
            created_at,
            due_date,
            is_completed,
            current_streak,
            last_verified_at,
        }
    }

    fn validate_text(field: &str, value: String) -> Result<String, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation(format!("{field} cannot be empty")));
        }
        Ok(trimmed.to_string())
    }

    pub fn id(&self) -> &GoalId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn period(&self) -> GoalPeriod {
        self.period
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn last_verified_at(&self) -> Option<DateTime<Utc>> {
        self.last_verified_at
    }

    pub fn rename(&mut self, title: String) -> Result<(), DomainError> {
        self.title = Self::validate_text("Goal title", title)?;
        Ok(())
    }

    pub fn recategorize(&mut self, category: String) -> Result<(), DomainError> {
        self.category = Self::validate_text("Goal category", category)?;
        Ok(())
    }

    pub fn change_period(&mut self, period: GoalPeriod) {
        self.period = period;
    }

    pub fn update_memo(&mut self, memo: Option<String>) {
        self.memo = memo.filter(|m| !m.trim().is_empty());
    }

    pub fn update_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.is_completed = completed;
    }

    pub fn is_verified_on_same_day(&self, now: DateTime<Utc>, boundary: &DayBoundary) -> bool {
        self.last_verified_at
            .is_some_and(|last| boundary.is_same_day(last, now))
    }

    /// Mark the goal verified at `now` and advance its streak.
    ///
    /// The streak grows by one only when the previous verification was on the
    /// day before; any other history (never verified, or a gap) resets it to 0.
    pub fn verify(&mut self, now: DateTime<Utc>, boundary: &DayBoundary) -> Result<u32, DomainError> {
        if self.is_verified_on_same_day(now, boundary) {
            return Err(DomainError::AlreadyCheckedIn(format!(
                "Goal {} was already checked in on {}",
                self.id,
                boundary.date_of(now)
            )));
        }

        self.current_streak = match self.last_verified_at {
            Some(last) if boundary.is_previous_day(last, now) => self.current_streak + 1,
            _ => 0,
        };
        self.last_verified_at = Some(now);

        Ok(self.current_streak)
    }
}
