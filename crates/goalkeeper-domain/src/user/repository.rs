use async_trait::async_trait;

use super::{SocialProvider, User};
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Look a user up by the identity provider's subject id
    async fn find_by_provider(
        &self,
        provider: SocialProvider,
        subject: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Delete a user; owned goals, posts, reactions and items go with it
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
