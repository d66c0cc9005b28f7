use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::community_commands::*;
use crate::application::dtos::{PostDto, ReactionResultDto};
use goalkeeper_domain::community::{
    ImageStore, Post, PostRepository, Reaction, ReactionAction, ReactionRepository,
};
use goalkeeper_domain::shared::{DomainError, PostId, UserId};
use goalkeeper_domain::user::UserRepository;

async fn load_post(post_repo: &dyn PostRepository, post_id: &str) -> Result<Post, DomainError> {
    post_repo
        .find_by_id(&PostId::from_string(post_id))
        .await?
        .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))
}

/// Best-effort removal; a leftover file never fails the request
async fn discard_image(image_store: &dyn ImageStore, url: &str) {
    if let Err(e) = image_store.remove(url).await {
        warn!("Failed to remove stored image {}: {}", url, e);
    }
}

// ============================================================
// Create Post
// ============================================================

pub struct CreatePostCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl CreatePostCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            image_store,
        }
    }
}

#[async_trait]
impl CommandHandler<CreatePostCommand> for CreatePostCommandHandler {
    type Result = PostResult;

    async fn handle(&self, cmd: CreatePostCommand) -> Result<Self::Result, DomainError> {
        info!("Handling CreatePostCommand for user: {}", cmd.user_id);

        let author = self
            .user_repo
            .find_by_id(&UserId::from_string(&cmd.user_id))
            .await?
            .ok_or_else(|| DomainError::UserNotFound(cmd.user_id.clone()))?;

        // Validate before touching storage
        let mut post = Post::new(author.id().clone(), cmd.title, cmd.content, None)?;

        let stored_url = match cmd.image {
            Some(image) => {
                let url = self.image_store.store(&image.filename, &image.bytes).await?;
                post.replace_image(url.clone());
                Some(url)
            }
            None => None,
        };

        if let Err(e) = self.post_repo.save(&post).await {
            if let Some(url) = &stored_url {
                discard_image(self.image_store.as_ref(), url).await;
            }
            return Err(e);
        }

        info!("Post created: {} by {}", post.id(), author.id());
        Ok(PostDto::build(&post, Some(author.nickname()), &[], None))
    }
}

// ============================================================
// Update Post
// ============================================================

pub struct UpdatePostCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl UpdatePostCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        post_repo: Arc<dyn PostRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        image_store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            user_repo,
            post_repo,
            reaction_repo,
            image_store,
        }
    }
}

#[async_trait]
impl CommandHandler<UpdatePostCommand> for UpdatePostCommandHandler {
    type Result = PostResult;

    async fn handle(&self, cmd: UpdatePostCommand) -> Result<Self::Result, DomainError> {
        info!("Handling UpdatePostCommand for post: {}", cmd.post_id);

        let user_id = UserId::from_string(&cmd.user_id);
        let mut post = load_post(self.post_repo.as_ref(), &cmd.post_id).await?;
        post.ensure_author(&user_id)?;
        post.edit(cmd.title, cmd.content)?;

        let mut new_url = None;
        let mut old_url = None;
        if let Some(image) = cmd.image {
            let url = self.image_store.store(&image.filename, &image.bytes).await?;
            old_url = post.replace_image(url.clone());
            new_url = Some(url);
        }

        if let Err(e) = self.post_repo.save(&post).await {
            if let Some(url) = &new_url {
                discard_image(self.image_store.as_ref(), url).await;
            }
            return Err(e);
        }

        // The old file may share the new URL if the store reused a name
        if let Some(url) = old_url.filter(|old| new_url.as_ref() != Some(old)) {
            discard_image(self.image_store.as_ref(), &url).await;
        }

        let author = self.user_repo.find_by_id(post.author_id()).await?;
        let reactions = self.reaction_repo.find_by_post(post.id()).await?;

        info!("Post updated: {}", post.id());
        Ok(PostDto::build(
            &post,
            author.as_ref().map(|a| a.nickname()),
            &reactions,
            Some(&user_id),
        ))
    }
}

// ============================================================
// Delete Post
// ============================================================

pub struct DeletePostCommandHandler {
    post_repo: Arc<dyn PostRepository>,
    image_store: Arc<dyn ImageStore>,
}

impl DeletePostCommandHandler {
    pub fn new(post_repo: Arc<dyn PostRepository>, image_store: Arc<dyn ImageStore>) -> Self {
        Self {
            post_repo,
            image_store,
        }
    }
}

#[async_trait]
impl CommandHandler<DeletePostCommand> for DeletePostCommandHandler {
    type Result = DeletePostResult;

    async fn handle(&self, cmd: DeletePostCommand) -> Result<Self::Result, DomainError> {
        info!("Handling DeletePostCommand for post: {}", cmd.post_id);

        let post = load_post(self.post_repo.as_ref(), &cmd.post_id).await?;
        post.ensure_author(&UserId::from_string(&cmd.user_id))?;

        self.post_repo.delete(post.id()).await?;

        if let Some(url) = post.image_url() {
            discard_image(self.image_store.as_ref(), url).await;
        }

        info!("Post deleted: {}", cmd.post_id);
        Ok(())
    }
}

// ============================================================
// React To Post
// ============================================================

pub struct ReactToPostCommandHandler {
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
}

impl ReactToPostCommandHandler {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
    ) -> Self {
        Self {
            post_repo,
            reaction_repo,
        }
    }
}

#[async_trait]
impl CommandHandler<ReactToPostCommand> for ReactToPostCommandHandler {
    type Result = ReactToPostResult;

    async fn handle(&self, cmd: ReactToPostCommand) -> Result<Self::Result, DomainError> {
        let post = load_post(self.post_repo.as_ref(), &cmd.post_id).await?;
        let user_id = UserId::from_string(&cmd.user_id);
        let pressed = Reaction::new(post.id().clone(), user_id.clone(), cmd.emoji)?;

        let existing = self.reaction_repo.find(post.id(), &user_id).await?;
        let action = Reaction::toggle(existing.as_ref(), &pressed);

        let emoji = match action {
            ReactionAction::Created | ReactionAction::Updated => {
                self.reaction_repo.upsert(&pressed).await?;
                Some(pressed.emoji)
            }
            ReactionAction::Deleted => {
                self.reaction_repo.delete(post.id(), &user_id).await?;
                None
            }
        };

        info!(
            "Reaction {:?} on post {} by {}",
            action,
            post.id(),
            user_id
        );

        Ok(ReactionResultDto {
            post_id: post.id().as_str().to_string(),
            action,
            emoji,
        })
    }
}
