use chrono::{DateTime, Utc};

use super::value_objects::{CheckInOutcome, RewardItem, RewardPolicy};
use crate::goal::Goal;
use crate::shared::{DayBoundary, DomainError};
use crate::user::{DailyActivity, User};

/// Domain service for the streak and reward rules of a goal check-in
/// Pure logic: callers load the aggregates and persist them afterwards
pub struct CheckInDomainService;

impl CheckInDomainService {
    /// Verify `goal` for `user` at `now` and apply the rewards.
    ///
    /// On error neither aggregate is modified.
    pub fn check_in(
        goal: &mut Goal,
        user: &mut User,
        now: DateTime<Utc>,
        boundary: &DayBoundary,
        policy: &RewardPolicy,
    ) -> Result<CheckInOutcome, DomainError> {
        if !goal.is_owned_by(user.id()) {
            return Err(DomainError::GoalNotFound(goal.id().to_string()));
        }
        policy.validate()?;

        let mut next_goal = goal.clone();
        let mut next_user = user.clone();

        let current_streak = next_goal.verify(now, boundary)?;

        let mut rewards = vec![RewardItem::base(policy.base_cash)];
        let activity = next_user.record_daily_activity(now, boundary);
        if let DailyActivity::FirstOfDay { total_streak } = activity {
            let streak_bonus = i64::from(total_streak) * policy.streak_cash_per_day;
            if streak_bonus > 0 {
                rewards.push(RewardItem::streak_bonus(total_streak, streak_bonus));
            }
            rewards.push(RewardItem::first_of_day(policy.first_of_day_cash));
        }

        let gained_cash: i64 = rewards.iter().map(|r| r.amount).sum();
        let gained_exp = policy.base_exp;
        let is_level_up = next_user.grant_reward(gained_cash, gained_exp)?;

        *goal = next_goal;
        *user = next_user;

        Ok(CheckInOutcome {
            goal_id: goal.id().clone(),
            checked_at: now,
            current_streak,
            total_streak: user.total_streak(),
            rewards,
            gained_cash,
            gained_exp,
            total_cash: user.cash(),
            current_level: user.level(),
            current_exp: user.exp(),
            is_level_up,
            is_first_of_day: matches!(activity, DailyActivity::FirstOfDay { .. }),
        })
    }

    /// Longest run of consecutive dates in an ascending, de-duplicated list
    pub fn longest_run(dates: &[chrono::NaiveDate]) -> u32 {
        let mut longest = 0;
        let mut current = 0;
        let mut previous: Option<chrono::NaiveDate> = None;

        for date in dates {
            current = match previous {
                Some(prev) if prev.succ_opt() == Some(*date) => current + 1,
                Some(prev) if prev == *date => current,
                _ => 1,
            };
            longest = longest.max(current);
            previous = Some(*date);
        }

        longest
    }
}
