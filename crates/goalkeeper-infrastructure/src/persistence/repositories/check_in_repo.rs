use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::goal_repo::update_verification;
use super::user_repo::update_progress;
use crate::persistence::{RepositoryErrorMapper, ResultExt, SqliteRepositoryBase};
use goalkeeper_domain::check_in::{CheckInDaySummary, CheckInRecord, CheckInRepository};
use goalkeeper_domain::goal::Goal;
use goalkeeper_domain::shared::{CheckInId, DomainError, GoalId, UserId};
use goalkeeper_domain::user::User;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        DomainError::DataIntegrity(format!("Invalid check_in_date: {} ({})", value, e))
    })
}

#[derive(FromRow)]
struct CheckInRow {
    id: String,
    goal_id: String,
    user_id: String,
    checked_at: DateTime<Utc>,
    check_in_date: String,
    goal_streak: i64,
    total_streak: i64,
    gained_cash: i64,
    gained_exp: i64,
    is_first_of_day: bool,
    is_level_up: bool,
}

impl CheckInRow {
    fn into_record(self) -> Result<CheckInRecord, DomainError> {
        Ok(CheckInRecord::restore(
            CheckInId::from_string(&self.id),
            GoalId::from_string(&self.goal_id),
            UserId::from_string(&self.user_id),
            self.checked_at,
            parse_date(&self.check_in_date)?,
            RepositoryErrorMapper::to_u32(self.goal_streak, "goal_streak")?,
            RepositoryErrorMapper::to_u32(self.total_streak, "total_streak")?,
            self.gained_cash,
            RepositoryErrorMapper::to_u32(self.gained_exp, "gained_exp")?,
            self.is_first_of_day,
            self.is_level_up,
        ))
    }
}

#[derive(FromRow)]
struct DailySummaryRow {
    check_in_date: String,
    check_ins: i64,
    gained_cash: i64,
    gained_exp: i64,
}

impl DailySummaryRow {
    fn try_into_summary(self) -> Result<CheckInDaySummary, DomainError> {
        Ok(CheckInDaySummary {
            date: parse_date(&self.check_in_date)?,
            check_ins: RepositoryErrorMapper::to_u32(self.check_ins, "check_ins")?,
            gained_cash: self.gained_cash,
            gained_exp: RepositoryErrorMapper::to_u32(self.gained_exp, "gained_exp")?,
        })
    }
}

pub struct SqliteCheckInRepository {
    base: SqliteRepositoryBase,
}

impl SqliteCheckInRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl CheckInRepository for SqliteCheckInRepository {
    async fn commit(
        &self,
        goal: &Goal,
        user: &User,
        record: &CheckInRecord,
    ) -> Result<(), DomainError> {
        let start = Instant::now();

        let mut tx = self.base.pool().begin().await.map_repo_error("Begin transaction")?;

        update_verification(&mut tx, goal, "Save checked goal").await?;
        update_progress(&mut tx, user, "Save rewarded user").await?;

        let insert_record = r#"
            INSERT INTO check_ins (
                id, goal_id, user_id, checked_at, check_in_date, goal_streak,
                total_streak, gained_cash, gained_exp, is_first_of_day, is_level_up
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#;

        sqlx::query(insert_record)
            .bind(record.id().as_str())
            .bind(record.goal_id().as_str())
            .bind(record.user_id().as_str())
            .bind(record.checked_at())
            .bind(record.check_in_date().format(DATE_FORMAT).to_string())
            .bind(i64::from(record.goal_streak()))
            .bind(i64::from(record.total_streak()))
            .bind(record.gained_cash())
            .bind(i64::from(record.gained_exp()))
            .bind(record.is_first_of_day())
            .bind(record.is_level_up())
            .execute(&mut *tx)
            .await
            .map_repo_error("Insert check-in record")?;

        tx.commit().await.map_repo_error("Commit check-in")?;

        info!(
            goal_id = %goal.id(),
            user_id = %user.id(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Check-in committed"
        );

        Ok(())
    }

    async fn daily_summaries(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CheckInDaySummary>, DomainError> {
        let query = r#"
            SELECT
                check_in_date,
                COUNT(*) AS check_ins,
                SUM(gained_cash) AS gained_cash,
                SUM(gained_exp) AS gained_exp
            FROM check_ins
            WHERE user_id = ?1
              AND check_in_date >= ?2
              AND check_in_date <= ?3
            GROUP BY check_in_date
            ORDER BY check_in_date ASC
        "#;

        let rows: Vec<DailySummaryRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(start.format(DATE_FORMAT).to_string())
                    .bind(end.format(DATE_FORMAT).to_string()),
                "List daily check-in summaries",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_summary()).collect()
    }

    async fn active_dates(&self, user_id: &UserId) -> Result<Vec<NaiveDate>, DomainError> {
        let query = r#"
            SELECT DISTINCT check_in_date
            FROM check_ins
            WHERE user_id = ?1
            ORDER BY check_in_date ASC
        "#;

        let dates: Vec<String> = sqlx::query_scalar(query)
            .bind(user_id.as_str())
            .fetch_all(self.base.pool())
            .await
            .map_repo_error("List active check-in dates")?;

        dates.iter().map(|d| parse_date(d)).collect()
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM check_ins WHERE user_id = ?1")
            .bind(user_id.as_str())
            .fetch_one(self.base.pool())
            .await
            .map_repo_error("Count check-ins")?;

        u64::try_from(count)
            .map_err(|_| DomainError::DataIntegrity(format!("Negative check-in count: {count}")))
    }

    async fn find_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<CheckInRecord>, DomainError> {
        let query = r#"
            SELECT
                id, goal_id, user_id, checked_at, check_in_date, goal_streak,
                total_streak, gained_cash, gained_exp, is_first_of_day, is_level_up
            FROM check_ins
            WHERE user_id = ?1
            ORDER BY checked_at DESC
            LIMIT ?2
        "#;

        let rows: Vec<CheckInRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(i64::from(limit)),
                "Find recent check-ins",
            )
            .await?;

        rows.into_iter().map(CheckInRow::into_record).collect()
    }
}
