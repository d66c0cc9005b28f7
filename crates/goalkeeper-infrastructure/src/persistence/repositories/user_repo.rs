use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::sync::Arc;
use tracing::info;

use crate::persistence::{RepositoryErrorMapper, ResultExt, SqliteRepositoryBase};
use goalkeeper_domain::shared::{DomainError, UserId};
use goalkeeper_domain::user::{SocialProvider, User, UserRepository};

pub(crate) const USER_COLUMNS: &str = r#"
    id, nickname, email, provider, provider_subject, total_streak,
    last_check_date, level, exp, cash, created_at
"#;

#[derive(FromRow)]
pub(crate) struct UserRow {
    id: String,
    nickname: String,
    email: Option<String>,
    provider: String,
    provider_subject: String,
    total_streak: i64,
    last_check_date: Option<DateTime<Utc>>,
    level: i64,
    exp: i64,
    cash: i64,
    created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, DomainError> {
        let provider: SocialProvider = self.provider.parse().map_err(|_| {
            DomainError::DataIntegrity(format!("Unknown stored provider: {}", self.provider))
        })?;

        Ok(User::restore(
            UserId::from_string(&self.id),
            self.nickname,
            self.email,
            provider,
            self.provider_subject,
            RepositoryErrorMapper::to_u32(self.total_streak, "total_streak")?,
            self.last_check_date,
            RepositoryErrorMapper::to_u32(self.level, "level")?,
            RepositoryErrorMapper::to_u32(self.exp, "exp")?,
            self.cash,
            self.created_at,
        ))
    }
}

const UPSERT_USER: &str = r#"
    INSERT INTO users (
        id, nickname, email, provider, provider_subject, total_streak,
        last_check_date, level, exp, cash, created_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    ON CONFLICT(id) DO UPDATE SET
        nickname = ?2,
        email = ?3,
        total_streak = ?6,
        last_check_date = ?7,
        level = ?8,
        exp = ?9,
        cash = ?10
"#;

/// Bind a user onto [`UPSERT_USER`]
fn bind_user<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    user: &'q User,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(user.id().as_str())
        .bind(user.nickname())
        .bind(user.email())
        .bind(user.provider().as_str())
        .bind(user.provider_subject())
        .bind(i64::from(user.total_streak()))
        .bind(user.last_check_date())
        .bind(i64::from(user.level()))
        .bind(i64::from(user.exp()))
        .bind(user.cash())
        .bind(user.created_at())
}

/// Write streak, level and balance onto an existing user row.
/// A user deleted since it was loaded yields `UserNotFound`.
pub(crate) async fn update_progress(
    conn: &mut SqliteConnection,
    user: &User,
    operation: &str,
) -> Result<(), DomainError> {
    let query = r#"
        UPDATE users
        SET total_streak = ?2, last_check_date = ?3, level = ?4, exp = ?5, cash = ?6
        WHERE id = ?1
    "#;

    let result = sqlx::query(query)
        .bind(user.id().as_str())
        .bind(i64::from(user.total_streak()))
        .bind(user.last_check_date())
        .bind(i64::from(user.level()))
        .bind(i64::from(user.exp()))
        .bind(user.cash())
        .execute(conn)
        .await
        .map_repo_error(operation)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::UserNotFound(user.id().to_string()));
    }
    Ok(())
}

pub struct SqliteUserRepository {
    base: SqliteRepositoryBase,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.base
            .execute(bind_user(sqlx::query(UPSERT_USER), user), "Save user")
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");

        let row: Option<UserRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id.as_str()), "Find user by ID")
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_provider(
        &self,
        provider: SocialProvider,
        subject: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE provider = ?1 AND provider_subject = ?2"
        );

        let row: Option<UserRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(provider.as_str())
                    .bind(subject),
                "Find user by provider",
            )
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM users WHERE id = ?1").bind(id.as_str()),
                "Delete user",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id.to_string()));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
