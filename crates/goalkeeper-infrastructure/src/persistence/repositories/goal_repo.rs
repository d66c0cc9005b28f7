use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqliteConnection, SqlitePool};
use std::sync::Arc;

use crate::persistence::{RepositoryErrorMapper, ResultExt, SqliteRepositoryBase};
use goalkeeper_domain::goal::{Goal, GoalPeriod, GoalRepository};
use goalkeeper_domain::shared::{DomainError, GoalId, UserId};

const GOAL_COLUMNS: &str = r#"
    id, user_id, title, category, period, memo, created_at, due_date,
    is_completed, current_streak, last_verified_at
"#;

#[derive(FromRow)]
struct GoalRow {
    id: String,
    user_id: String,
    title: String,
    category: String,
    period: String,
    memo: Option<String>,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    is_completed: bool,
    current_streak: i64,
    last_verified_at: Option<DateTime<Utc>>,
}

impl GoalRow {
    fn into_goal(self) -> Result<Goal, DomainError> {
        let period: GoalPeriod = self.period.parse().map_err(|_| {
            DomainError::DataIntegrity(format!("Unknown stored goal period: {}", self.period))
        })?;

        Ok(Goal::restore(
            GoalId::from_string(&self.id),
            UserId::from_string(&self.user_id),
            self.title,
            self.category,
            period,
            self.memo,
            self.created_at,
            self.due_date,
            self.is_completed,
            RepositoryErrorMapper::to_u32(self.current_streak, "current_streak")?,
            self.last_verified_at,
        ))
    }
}

const UPSERT_GOAL: &str = r#"
    INSERT INTO goals (
        id, user_id, title, category, period, memo, created_at, due_date,
        is_completed, current_streak, last_verified_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    ON CONFLICT(id) DO UPDATE SET
        title = ?3,
        category = ?4,
        period = ?5,
        memo = ?6,
        due_date = ?8,
        is_completed = ?9,
        current_streak = ?10,
        last_verified_at = ?11
"#;

/// Bind a goal onto [`UPSERT_GOAL`]
fn bind_goal<'q>(
    query: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    goal: &'q Goal,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(goal.id().as_str())
        .bind(goal.user_id().as_str())
        .bind(goal.title())
        .bind(goal.category())
        .bind(goal.period().as_str())
        .bind(goal.memo())
        .bind(goal.created_at())
        .bind(goal.due_date())
        .bind(goal.is_completed())
        .bind(i64::from(goal.current_streak()))
        .bind(goal.last_verified_at())
}

/// Write the verification state onto an existing goal row.
/// A goal deleted since it was loaded yields `GoalNotFound`.
pub(crate) async fn update_verification(
    conn: &mut SqliteConnection,
    goal: &Goal,
    operation: &str,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        "UPDATE goals SET current_streak = ?2, last_verified_at = ?3 WHERE id = ?1 AND user_id = ?4",
    )
    .bind(goal.id().as_str())
    .bind(i64::from(goal.current_streak()))
    .bind(goal.last_verified_at())
    .bind(goal.user_id().as_str())
    .execute(conn)
    .await
    .map_repo_error(operation)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::GoalNotFound(goal.id().to_string()));
    }
    Ok(())
}

pub struct SqliteGoalRepository {
    base: SqliteRepositoryBase,
}

impl SqliteGoalRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl GoalRepository for SqliteGoalRepository {
    async fn save(&self, goal: &Goal) -> Result<(), DomainError> {
        self.base
            .execute(bind_goal(sqlx::query(UPSERT_GOAL), goal), "Save goal")
            .await?;
        Ok(())
    }

    async fn find_owned(&self, id: &GoalId, owner: &UserId) -> Result<Option<Goal>, DomainError> {
        let query = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1 AND user_id = ?2");

        let row: Option<GoalRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query).bind(id.as_str()).bind(owner.as_str()),
                "Find owned goal",
            )
            .await?;

        row.map(GoalRow::into_goal).transpose()
    }

    async fn find_by_user(&self, owner: &UserId) -> Result<Vec<Goal>, DomainError> {
        let query = format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC"
        );

        let rows: Vec<GoalRow> = self
            .base
            .fetch_all(sqlx::query_as(&query).bind(owner.as_str()), "Find goals by user")
            .await?;

        rows.into_iter().map(GoalRow::into_goal).collect()
    }

    async fn delete(&self, id: &GoalId) -> Result<(), DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM goals WHERE id = ?1").bind(id.as_str()),
                "Delete goal",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::GoalNotFound(id.to_string()));
        }
        Ok(())
    }
}
