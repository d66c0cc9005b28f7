use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, PostId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    author_id: UserId,
    title: String,
    content: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        author_id: UserId,
        title: String,
        content: String,
        image_url: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: PostId::new(),
            author_id,
            title: Self::validate_title(title)?,
            content: Self::validate_content(content)?,
            image_url,
            created_at: Utc::now(),
        })
    }

    pub fn restore(
        id: PostId,
        author_id: UserId,
        title: String,
        content: String,
        image_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            content,
            image_url,
            created_at,
        }
    }

    fn validate_title(title: String) -> Result<String, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("Post title cannot be empty".to_string()));
        }
        Ok(title.to_string())
    }

    fn validate_content(content: String) -> Result<String, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation("Post content cannot be empty".to_string()));
        }
        Ok(content)
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Forbidden unless `user_id` wrote the post
    pub fn ensure_author(&self, user_id: &UserId) -> Result<(), DomainError> {
        if &self.author_id != user_id {
            return Err(DomainError::Forbidden(format!(
                "Only the author can modify post {}",
                self.id
            )));
        }
        Ok(())
    }

    pub fn edit(&mut self, title: Option<String>, content: Option<String>) -> Result<(), DomainError> {
        if let Some(title) = title {
            self.title = Self::validate_title(title)?;
        }
        if let Some(content) = content {
            self.content = Self::validate_content(content)?;
        }
        Ok(())
    }

    /// Swap the image, returning the previous URL
    pub fn replace_image(&mut self, image_url: String) -> Option<String> {
        self.image_url.replace(image_url)
    }
}
