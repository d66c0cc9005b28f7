use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use goalkeeper_domain::community::{Post, PostRepository, Reaction, ReactionRepository};
use goalkeeper_domain::shared::{DomainError, PostId, UserId};

#[derive(FromRow)]
struct PostRow {
    id: String,
    author_id: String,
    title: String,
    content: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post::restore(
            PostId::from_string(&self.id),
            UserId::from_string(&self.author_id),
            self.title,
            self.content,
            self.image_url,
            self.created_at,
        )
    }
}

#[derive(FromRow)]
struct ReactionRow {
    post_id: String,
    user_id: String,
    emoji: String,
}

impl ReactionRow {
    fn into_reaction(self) -> Reaction {
        Reaction {
            post_id: PostId::from_string(&self.post_id),
            user_id: UserId::from_string(&self.user_id),
            emoji: self.emoji,
        }
    }
}

pub struct SqlitePostRepository {
    base: SqliteRepositoryBase,
}

impl SqlitePostRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn save(&self, post: &Post) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO posts (id, author_id, title, content, image_url, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                title = ?3,
                content = ?4,
                image_url = ?5
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(post.id().as_str())
                    .bind(post.author_id().as_str())
                    .bind(post.title())
                    .bind(post.content())
                    .bind(post.image_url())
                    .bind(post.created_at()),
                "Save post",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let query = r#"
            SELECT id, author_id, title, content, image_url, created_at
            FROM posts
            WHERE id = ?1
        "#;

        let row: Option<PostRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.as_str()), "Find post by ID")
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Post>, DomainError> {
        let query = r#"
            SELECT id, author_id, title, content, image_url, created_at
            FROM posts
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?1 OFFSET ?2
        "#;

        let rows: Vec<PostRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(i64::from(limit))
                    .bind(i64::from(skip)),
                "List posts",
            )
            .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn delete(&self, id: &PostId) -> Result<(), DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM posts WHERE id = ?1").bind(id.as_str()),
                "Delete post",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id.to_string()));
        }
        Ok(())
    }
}

pub struct SqliteReactionRepository {
    base: SqliteRepositoryBase,
}

impl SqliteReactionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl ReactionRepository for SqliteReactionRepository {
    async fn find(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> Result<Option<Reaction>, DomainError> {
        let row: Option<ReactionRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(
                    "SELECT post_id, user_id, emoji FROM reactions WHERE post_id = ?1 AND user_id = ?2",
                )
                .bind(post_id.as_str())
                .bind(user_id.as_str()),
                "Find reaction",
            )
            .await?;

        Ok(row.map(ReactionRow::into_reaction))
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Reaction>, DomainError> {
        let rows: Vec<ReactionRow> = self
            .base
            .fetch_all(
                sqlx::query_as("SELECT post_id, user_id, emoji FROM reactions WHERE post_id = ?1")
                    .bind(post_id.as_str()),
                "Find reactions by post",
            )
            .await?;

        Ok(rows.into_iter().map(ReactionRow::into_reaction).collect())
    }

    async fn upsert(&self, reaction: &Reaction) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO reactions (post_id, user_id, emoji)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(post_id, user_id) DO UPDATE SET emoji = ?3
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(reaction.post_id.as_str())
                    .bind(reaction.user_id.as_str())
                    .bind(reaction.emoji.as_str()),
                "Save reaction",
            )
            .await?;

        Ok(())
    }

    async fn delete(&self, post_id: &PostId, user_id: &UserId) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query("DELETE FROM reactions WHERE post_id = ?1 AND user_id = ?2")
                    .bind(post_id.as_str())
                    .bind(user_id.as_str()),
                "Delete reaction",
            )
            .await?;

        Ok(())
    }
}
