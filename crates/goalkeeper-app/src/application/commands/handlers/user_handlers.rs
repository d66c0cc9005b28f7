use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::user_commands::*;
use crate::application::dtos::{LoginResultDto, UserDto};
use crate::application::services::StarterKit;
use goalkeeper_domain::shared::{DomainError, UserId};
use goalkeeper_domain::shop::{AccessorySlot, CatalogRepository, InventoryRepository};
use goalkeeper_domain::user::{User, UserRepository};

/// Social login command handler
pub struct SocialLoginCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
    starter_kit: StarterKit,
}

impl SocialLoginCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
        starter_kit: StarterKit,
    ) -> Self {
        Self {
            user_repo,
            catalog_repo,
            inventory_repo,
            starter_kit,
        }
    }

    /// Grant the default mascot and background, equipped, unless already owned
    async fn grant_starter_kit(&self, user_id: &UserId) -> Result<(), DomainError> {
        match self
            .catalog_repo
            .find_mascot_by_name(&self.starter_kit.mascot_name)
            .await?
        {
            Some(mascot) => {
                if self
                    .inventory_repo
                    .grant_mascot(user_id, mascot.id(), true)
                    .await?
                {
                    info!("Granted starter mascot '{}' to {}", mascot.name(), user_id);
                }
            }
            None => warn!(
                "Starter mascot '{}' missing from catalog",
                self.starter_kit.mascot_name
            ),
        }

        match self
            .catalog_repo
            .find_accessory_by_name(&self.starter_kit.background_name)
            .await?
        {
            Some(background) => {
                if self
                    .inventory_repo
                    .grant_accessory(user_id, background.id(), AccessorySlot::Background, true)
                    .await?
                {
                    info!(
                        "Granted starter background '{}' to {}",
                        background.name(),
                        user_id
                    );
                }
            }
            None => warn!(
                "Starter background '{}' missing from catalog",
                self.starter_kit.background_name
            ),
        }

        Ok(())
    }
}

#[async_trait]
impl CommandHandler<SocialLoginCommand> for SocialLoginCommandHandler {
    type Result = SocialLoginResult;

    async fn handle(&self, cmd: SocialLoginCommand) -> Result<Self::Result, DomainError> {
        let profile = cmd.profile;
        info!(
            "Handling SocialLoginCommand: provider={}",
            profile.provider().as_str()
        );

        // 1. Resolve or register the user
        let existing = self
            .user_repo
            .find_by_provider(profile.provider(), profile.subject())
            .await?;

        let (user, is_new_user) = match existing {
            Some(user) => (user, false),
            None => {
                let user = User::register(&profile);
                self.user_repo.save(&user).await?;
                info!(
                    "Registered user {} ({}) via {}",
                    user.nickname(),
                    user.id(),
                    profile.provider().as_str()
                );
                (user, true)
            }
        };

        // 2. Starter kit is idempotent, so returning users are topped up too
        self.grant_starter_kit(user.id()).await?;

        Ok(LoginResultDto {
            user: UserDto::from(&user),
            is_new_user,
        })
    }
}

/// Update profile command handler
pub struct UpdateProfileCommandHandler {
    user_repo: Arc<dyn UserRepository>,
}

impl UpdateProfileCommandHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl CommandHandler<UpdateProfileCommand> for UpdateProfileCommandHandler {
    type Result = UpdateProfileResult;

    async fn handle(&self, cmd: UpdateProfileCommand) -> Result<Self::Result, DomainError> {
        info!("Handling UpdateProfileCommand for user: {}", cmd.user_id);

        let user_id = UserId::from_string(&cmd.user_id);
        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(cmd.user_id.clone()))?;

        if let Some(nickname) = cmd.nickname {
            user.update_nickname(nickname)?;
        }

        if let Some(email) = cmd.email.filter(|e| !e.trim().is_empty()) {
            user.update_email(email)?;
        }

        self.user_repo.save(&user).await?;

        Ok(UserDto::from(&user))
    }
}

/// Withdraw command handler; storage cascades to everything the user owns
pub struct WithdrawCommandHandler {
    user_repo: Arc<dyn UserRepository>,
}

impl WithdrawCommandHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl CommandHandler<WithdrawCommand> for WithdrawCommandHandler {
    type Result = WithdrawResult;

    async fn handle(&self, cmd: WithdrawCommand) -> Result<Self::Result, DomainError> {
        info!("Handling WithdrawCommand for user: {}", cmd.user_id);

        let user_id = UserId::from_string(&cmd.user_id);
        self.user_repo.delete(&user_id).await?;

        info!("User withdrawn: {}", cmd.user_id);
        Ok(())
    }
}
