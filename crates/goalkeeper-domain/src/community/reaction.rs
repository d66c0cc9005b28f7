use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::{DomainError, PostId, UserId};

/// One user's emoji on one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub post_id: PostId,
    pub user_id: UserId,
    pub emoji: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Created,
    Updated,
    Deleted,
}

impl Reaction {
    pub fn new(post_id: PostId, user_id: UserId, emoji: String) -> Result<Self, DomainError> {
        let emoji = emoji.trim().to_string();
        if emoji.is_empty() {
            return Err(DomainError::Validation("Emoji cannot be empty".to_string()));
        }
        Ok(Self {
            post_id,
            user_id,
            emoji,
        })
    }

    /// Decide what pressing `emoji` does given the user's current reaction
    pub fn toggle(existing: Option<&Reaction>, pressed: &Reaction) -> ReactionAction {
        match existing {
            None => ReactionAction::Created,
            Some(current) if current.emoji == pressed.emoji => ReactionAction::Deleted,
            Some(_) => ReactionAction::Updated,
        }
    }

    /// Count reactions per emoji
    pub fn tally(reactions: &[Reaction]) -> BTreeMap<String, u32> {
        let mut counts = BTreeMap::new();
        for reaction in reactions {
            *counts.entry(reaction.emoji.clone()).or_insert(0) += 1;
        }
        counts
    }
}
