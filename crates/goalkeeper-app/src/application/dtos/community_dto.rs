use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use goalkeeper_domain::community::{Post, Reaction, ReactionAction};
use goalkeeper_domain::shared::UserId;

/// Author nickname shown when the author account no longer exists
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: String,
    pub author_id: String,
    pub author_nickname: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub reactions: BTreeMap<String, u32>,
    pub my_reaction: Option<String>,
}

impl PostDto {
    pub fn build(
        post: &Post,
        author_nickname: Option<&str>,
        reactions: &[Reaction],
        viewer: Option<&UserId>,
    ) -> Self {
        let my_reaction = viewer.and_then(|viewer| {
            reactions
                .iter()
                .find(|r| &r.user_id == viewer)
                .map(|r| r.emoji.clone())
        });

        Self {
            id: post.id().as_str().to_string(),
            author_id: post.author_id().as_str().to_string(),
            author_nickname: author_nickname.unwrap_or(UNKNOWN_AUTHOR).to_string(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            image_url: post.image_url().map(str::to_string),
            created_at: post.created_at().to_rfc3339(),
            reactions: Reaction::tally(reactions),
            my_reaction,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionResultDto {
    pub post_id: String,
    pub action: ReactionAction,
    pub emoji: Option<String>,
}
