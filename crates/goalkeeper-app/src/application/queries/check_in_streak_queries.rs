use chrono::{Datelike, NaiveDate};
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dtos::{
    CheckInCalendarDto, CheckInDayDto, CheckInRecordDto, GoalStreakDto, MonthStatsDto,
    StreakSummaryDto,
};
use goalkeeper_domain::check_in::{CheckInDaySummary, CheckInDomainService, CheckInRepository};
use goalkeeper_domain::goal::GoalRepository;
use goalkeeper_domain::shared::{DayBoundary, DomainError, UserId};
use goalkeeper_domain::user::UserRepository;

/// First and last day of a calendar month
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), DomainError> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::InvalidInput(format!("Invalid month: {month}")));
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::InvalidInput(format!("Invalid year: {year}")))?;
    let first_day_next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last_day = first_day_next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| DomainError::InvalidInput(format!("Invalid year: {year}")))?;

    Ok((first_day, last_day))
}

pub struct CheckInStreakQueries {
    user_repo: Arc<dyn UserRepository>,
    goal_repo: Arc<dyn GoalRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    boundary: DayBoundary,
}

impl CheckInStreakQueries {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        goal_repo: Arc<dyn GoalRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
        boundary: DayBoundary,
    ) -> Self {
        Self {
            user_repo,
            goal_repo,
            check_in_repo,
            boundary,
        }
    }

    /// Account-wide and per-goal streaks, plus totals from the history
    pub async fn streak_summary(&self, user_id: &str) -> Result<StreakSummaryDto, DomainError> {
        let id = UserId::from_string(user_id);
        let user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;

        let goals = self.goal_repo.find_by_user(&id).await?;
        let active_dates = self.check_in_repo.active_dates(&id).await?;
        let total_check_ins = self.check_in_repo.count_by_user(&id).await?;

        let dto = StreakSummaryDto {
            user_id: user_id.to_string(),
            total_streak: user.total_streak(),
            longest_streak: CheckInDomainService::longest_run(&active_dates),
            total_check_ins,
            total_check_in_days: active_dates.len() as u32,
            last_check_date: user
                .last_check_date()
                .map(|d| self.boundary.date_of(d).format("%Y-%m-%d").to_string()),
            goals: goals
                .iter()
                .map(|goal| GoalStreakDto {
                    goal_id: goal.id().as_str().to_string(),
                    title: goal.title().to_string(),
                    current_streak: goal.current_streak(),
                    last_verified_at: goal.last_verified_at().map(|d| d.to_rfc3339()),
                })
                .collect(),
        };

        info!(
            "[streak] summary user_id={} total={} longest={} check_ins={}",
            dto.user_id, dto.total_streak, dto.longest_streak, dto.total_check_ins
        );

        Ok(dto)
    }

    /// Every day of the month with its check-in count and rewards
    pub async fn calendar(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<CheckInCalendarDto, DomainError> {
        let (first_day, last_day) = month_bounds(year, month)?;

        let summaries = self
            .check_in_repo
            .daily_summaries(&UserId::from_string(user_id), first_day, last_day)
            .await?;
        let by_date: HashMap<NaiveDate, CheckInDaySummary> =
            summaries.into_iter().map(|s| (s.date, s)).collect();

        let mut days = Vec::with_capacity(last_day.day() as usize);
        let mut checked_in_days = 0u32;
        let mut total_check_ins = 0u32;
        let mut total_cash = 0i64;

        for date in first_day.iter_days().take_while(|d| *d <= last_day) {
            let day = match by_date.get(&date) {
                Some(summary) => {
                    checked_in_days += 1;
                    total_check_ins += summary.check_ins;
                    total_cash += summary.gained_cash;
                    CheckInDayDto {
                        date: date.format("%Y-%m-%d").to_string(),
                        is_checked_in: true,
                        check_ins: summary.check_ins,
                        gained_cash: summary.gained_cash,
                        gained_exp: summary.gained_exp,
                    }
                }
                None => CheckInDayDto {
                    date: date.format("%Y-%m-%d").to_string(),
                    is_checked_in: false,
                    check_ins: 0,
                    gained_cash: 0,
                    gained_exp: 0,
                },
            };
            days.push(day);
        }

        let total_days = last_day.day();
        let check_in_rate = f64::from(checked_in_days) / f64::from(total_days) * 100.0;

        info!(
            "[streak] calendar user_id={} month={:04}-{:02} checked_in_days={}",
            user_id, year, month, checked_in_days
        );

        Ok(CheckInCalendarDto {
            user_id: user_id.to_string(),
            year,
            month,
            days,
            month_stats: MonthStatsDto {
                total_days,
                checked_in_days,
                check_in_rate,
                total_check_ins,
                total_cash,
            },
        })
    }

    /// Most recent check-ins, newest first
    pub async fn recent_history(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<CheckInRecordDto>, DomainError> {
        let records = self
            .check_in_repo
            .find_recent(&UserId::from_string(user_id), limit)
            .await?;
        Ok(records.iter().map(CheckInRecordDto::from).collect())
    }
}
