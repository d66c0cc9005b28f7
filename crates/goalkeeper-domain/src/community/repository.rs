use async_trait::async_trait;

use super::{Post, Reaction};
use crate::shared::{DomainError, PostId, UserId};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn save(&self, post: &Post) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;
    /// Newest first
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Post>, DomainError>;
    /// Removes the post and its reactions
    async fn delete(&self, id: &PostId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    async fn find(&self, post_id: &PostId, user_id: &UserId)
        -> Result<Option<Reaction>, DomainError>;
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Reaction>, DomainError>;
    /// Insert or replace the user's reaction on a post
    async fn upsert(&self, reaction: &Reaction) -> Result<(), DomainError>;
    async fn delete(&self, post_id: &PostId, user_id: &UserId) -> Result<(), DomainError>;
}
