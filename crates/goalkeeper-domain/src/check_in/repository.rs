use async_trait::async_trait;
use chrono::NaiveDate;

use super::{CheckInDaySummary, CheckInRecord};
use crate::goal::Goal;
use crate::shared::{DomainError, UserId};
use crate::user::User;

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Persist the goal, the user and the history record in one transaction.
    ///
    /// Either all three writes land or none do.
    async fn commit(
        &self,
        goal: &Goal,
        user: &User,
        record: &CheckInRecord,
    ) -> Result<(), DomainError>;

    /// Daily rollups for a user, oldest first, over `[start, end]`
    async fn daily_summaries(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CheckInDaySummary>, DomainError>;

    /// Every distinct calendar day the user checked something in, oldest first
    async fn active_dates(&self, user_id: &UserId) -> Result<Vec<NaiveDate>, DomainError>;

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Most recent check-ins, newest first
    async fn find_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<CheckInRecord>, DomainError>;
}
