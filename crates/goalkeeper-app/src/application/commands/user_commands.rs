use crate::application::commands::command_handler::Command;
use crate::application::dtos::{LoginResultDto, UserDto};
use goalkeeper_domain::user::SocialProfile;

/// Resolve a verified social profile to a user, registering on first sight
#[derive(Debug, Clone)]
pub struct SocialLoginCommand {
    pub profile: SocialProfile,
}

impl Command for SocialLoginCommand {}

pub type SocialLoginResult = LoginResultDto;

/// Update profile command; blank fields are left unchanged
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
}

impl Command for UpdateProfileCommand {}

pub type UpdateProfileResult = UserDto;

#[derive(Debug, Clone)]
pub struct WithdrawCommand {
    pub user_id: String,
}

impl Command for WithdrawCommand {}

pub type WithdrawResult = ();
