use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{SocialProfile, SocialProvider};
use crate::shared::{DayBoundary, DomainError, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    nickname: String,
    email: Option<String>,
    provider: SocialProvider,
    provider_subject: String,
    total_streak: u32,
    last_check_date: Option<DateTime<Utc>>,
    level: u32,
    exp: u32,
    cash: i64,
    created_at: DateTime<Utc>,
}

/// What happened to the account-wide streak on a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyActivity {
    /// First check-in of the calendar day; carries the updated streak
    FirstOfDay { total_streak: u32 },
    /// The user already checked something in today
    Repeat,
}

impl User {
    pub const EXP_PER_LEVEL: u32 = 100;

    pub fn register(profile: &SocialProfile) -> Self {
        Self {
            id: UserId::new(),
            nickname: profile.display_name(),
            email: profile.email().map(str::to_string),
            provider: profile.provider(),
            provider_subject: profile.subject().to_string(),
            total_streak: 0,
            last_check_date: None,
            level: 1,
            exp: 0,
            cash: 0,
            created_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        nickname: String,
        email: Option<String>,
        provider: SocialProvider,
        provider_subject: String,
        total_streak: u32,
        last_check_date: Option<DateTime<Utc>>,
        level: u32,
        exp: u32,
        cash: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            nickname,
            email,
            provider,
            provider_subject,
            total_streak,
            last_check_date,
            level,
            exp,
            cash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn provider(&self) -> SocialProvider {
        self.provider
    }

    pub fn provider_subject(&self) -> &str {
        &self.provider_subject
    }

    pub fn total_streak(&self) -> u32 {
        self.total_streak
    }

    pub fn last_check_date(&self) -> Option<DateTime<Utc>> {
        self.last_check_date
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn cash(&self) -> i64 {
        self.cash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn update_nickname(&mut self, nickname: String) -> Result<(), DomainError> {
        if nickname.trim().is_empty() {
            return Err(DomainError::Validation(
                "Nickname cannot be empty".to_string(),
            ));
        }
        self.nickname = nickname.trim().to_string();
        Ok(())
    }

    pub fn update_email(&mut self, email: String) -> Result<(), DomainError> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(DomainError::Validation(format!(
                "Invalid email address: {email}"
            )));
        }
        self.email = Some(email.to_string());
        Ok(())
    }

    /// Advance the account-wide streak for a check-in happening at `now`.
    ///
    /// Only the first check-in of a calendar day touches the streak: it grows
    /// by one when the previous active day was yesterday and restarts at 1
    /// otherwise. `last_check_date` is stamped on that first check-in only.
    pub fn record_daily_activity(
        &mut self,
        now: DateTime<Utc>,
        boundary: &DayBoundary,
    ) -> DailyActivity {
        if let Some(last) = self.last_check_date {
            if boundary.is_same_day(last, now) {
                return DailyActivity::Repeat;
            }
        }

        self.total_streak = match self.last_check_date {
            Some(last) if boundary.is_previous_day(last, now) => self.total_streak + 1,
            _ => 1,
        };
        self.last_check_date = Some(now);

        DailyActivity::FirstOfDay {
            total_streak: self.total_streak,
        }
    }

    /// Credit cash and exp; returns true when the exp crossed a level.
    ///
    /// Rollover is single-step: at most one level per call.
    pub fn grant_reward(&mut self, cash: i64, exp: u32) -> Result<bool, DomainError> {
        if cash < 0 {
            return Err(DomainError::Validation(
                "Reward cash cannot be negative".to_string(),
            ));
        }

        self.cash += cash;
        self.exp += exp;

        if self.exp >= Self::EXP_PER_LEVEL {
            self.level += 1;
            self.exp -= Self::EXP_PER_LEVEL;
            return Ok(true);
        }

        Ok(false)
    }

    /// Deduct `amount` for a purchase
    pub fn spend_cash(&mut self, amount: i64) -> Result<(), DomainError> {
        if amount < 0 {
            return Err(DomainError::Validation(
                "Price cannot be negative".to_string(),
            ));
        }
        if self.cash < amount {
            return Err(DomainError::InsufficientCash(format!(
                "need {}, have {}",
                amount, self.cash
            )));
        }
        self.cash -= amount;
        Ok(())
    }
}
