use std::sync::Arc;

use crate::application::dtos::UserDto;
use goalkeeper_domain::shared::{DomainError, UserId};
use goalkeeper_domain::user::UserRepository;

pub struct UserQueryService {
    user_repo: Arc<dyn UserRepository>,
}

impl UserQueryService {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserDto, DomainError> {
        let user = self
            .user_repo
            .find_by_id(&UserId::from_string(user_id))
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))?;

        Ok(UserDto::from(&user))
    }
}
