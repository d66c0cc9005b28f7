use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::dtos::PostDto;
use goalkeeper_domain::community::{Post, PostRepository, ReactionRepository};
use goalkeeper_domain::shared::{DomainError, PostId, UserId};
use goalkeeper_domain::user::UserRepository;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct CommunityQueryService {
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl CommunityQueryService {
    pub fn new(
        post_repo: Arc<dyn PostRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            post_repo,
            reaction_repo,
            user_repo,
        }
    }

    /// Feed page, newest first
    pub async fn list_posts(
        &self,
        viewer: Option<&str>,
        skip: u32,
        limit: Option<u32>,
    ) -> Result<Vec<PostDto>, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let viewer = viewer.map(UserId::from_string);
        let posts = self.post_repo.list(skip, limit).await?;

        let mut nicknames: HashMap<String, Option<String>> = HashMap::new();
        let mut results = Vec::with_capacity(posts.len());

        for post in &posts {
            let author_key = post.author_id().as_str().to_string();
            if !nicknames.contains_key(&author_key) {
                let nickname = self
                    .user_repo
                    .find_by_id(post.author_id())
                    .await?
                    .map(|u| u.nickname().to_string());
                nicknames.insert(author_key.clone(), nickname);
            }
            let nickname = nicknames.get(&author_key).and_then(|n| n.as_deref());

            results.push(self.to_dto(post, nickname, viewer.as_ref()).await?);
        }

        debug!(
            "Listed {} post(s) (skip={}, limit={})",
            results.len(),
            skip,
            limit
        );
        Ok(results)
    }

    pub async fn get_post(
        &self,
        viewer: Option<&str>,
        post_id: &str,
    ) -> Result<PostDto, DomainError> {
        let post = self
            .post_repo
            .find_by_id(&PostId::from_string(post_id))
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id.to_string()))?;

        let author = self.user_repo.find_by_id(post.author_id()).await?;
        let viewer = viewer.map(UserId::from_string);

        self.to_dto(&post, author.as_ref().map(|a| a.nickname()), viewer.as_ref())
            .await
    }

    async fn to_dto(
        &self,
        post: &Post,
        author_nickname: Option<&str>,
        viewer: Option<&UserId>,
    ) -> Result<PostDto, DomainError> {
        let reactions = self.reaction_repo.find_by_post(post.id()).await?;
        Ok(PostDto::build(post, author_nickname, &reactions, viewer))
    }
}
