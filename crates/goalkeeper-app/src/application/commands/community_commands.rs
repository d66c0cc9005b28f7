use crate::application::commands::command_handler::Command;
use crate::application::dtos::{PostDto, ReactionResultDto};

/// Raw image as uploaded, before it is stored
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

impl Command for CreatePostCommand {}

#[derive(Debug, Clone)]
pub struct UpdatePostCommand {
    pub user_id: String,
    pub post_id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<ImageUpload>,
}

impl Command for UpdatePostCommand {}

pub type PostResult = PostDto;

#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub user_id: String,
    pub post_id: String,
}

impl Command for DeletePostCommand {}

pub type DeletePostResult = ();

#[derive(Debug, Clone)]
pub struct ReactToPostCommand {
    pub user_id: String,
    pub post_id: String,
    pub emoji: String,
}

impl Command for ReactToPostCommand {}

pub type ReactToPostResult = ReactionResultDto;
