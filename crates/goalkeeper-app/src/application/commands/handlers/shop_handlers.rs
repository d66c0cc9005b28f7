use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::shop_commands::*;
use crate::application::dtos::{OwnedAccessoryDto, OwnedMascotDto, PurchaseResultDto};
use goalkeeper_domain::shared::{AccessoryId, DomainError, MascotId, UserId};
use goalkeeper_domain::shop::{
    CatalogRepository, InventoryRepository, OwnedAccessory, ShopDomainService,
};
use goalkeeper_domain::user::{User, UserRepository};

async fn load_user(user_repo: &dyn UserRepository, user_id: &str) -> Result<User, DomainError> {
    user_repo
        .find_by_id(&UserId::from_string(user_id))
        .await?
        .ok_or_else(|| DomainError::UserNotFound(user_id.to_string()))
}

async fn load_owned_accessory(
    inventory_repo: &dyn InventoryRepository,
    user_id: &UserId,
    accessory_id: &str,
) -> Result<OwnedAccessory, DomainError> {
    inventory_repo
        .find_owned_accessory(user_id, &AccessoryId::from_string(accessory_id))
        .await?
        .ok_or_else(|| DomainError::NotOwned(format!("accessory {accessory_id}")))
}

// ============================================================
// Purchases
// ============================================================

pub struct BuyMascotCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl BuyMascotCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self {
            user_repo,
            catalog_repo,
            inventory_repo,
        }
    }
}

#[async_trait]
impl CommandHandler<BuyMascotCommand> for BuyMascotCommandHandler {
    type Result = BuyItemResult;

    async fn handle(&self, cmd: BuyMascotCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling BuyMascotCommand: user={} mascot={}",
            cmd.user_id, cmd.mascot_id
        );

        let mut user = load_user(self.user_repo.as_ref(), &cmd.user_id).await?;
        let mascot_id = MascotId::from_string(&cmd.mascot_id);
        let mascot = self
            .catalog_repo
            .find_mascot(&mascot_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(format!("mascot {}", cmd.mascot_id)))?;

        let already_owned = self
            .inventory_repo
            .find_owned_mascot(user.id(), &mascot_id)
            .await?
            .is_some();
        let remaining_cash =
            ShopDomainService::charge(&mut user, mascot.name(), mascot.price(), already_owned)?;

        self.inventory_repo.purchase_mascot(&user, &mascot_id).await?;

        info!(
            "Mascot purchased: {} by {} (remaining cash {})",
            mascot.name(),
            user.id(),
            remaining_cash
        );

        Ok(PurchaseResultDto {
            item_id: mascot.id().as_str().to_string(),
            item_name: mascot.name().to_string(),
            price: mascot.price(),
            remaining_cash,
        })
    }
}

pub struct BuyAccessoryCommandHandler {
    user_repo: Arc<dyn UserRepository>,
    catalog_repo: Arc<dyn CatalogRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl BuyAccessoryCommandHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        catalog_repo: Arc<dyn CatalogRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self {
            user_repo,
            catalog_repo,
            inventory_repo,
        }
    }
}

#[async_trait]
impl CommandHandler<BuyAccessoryCommand> for BuyAccessoryCommandHandler {
    type Result = BuyItemResult;

    async fn handle(&self, cmd: BuyAccessoryCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling BuyAccessoryCommand: user={} accessory={}",
            cmd.user_id, cmd.accessory_id
        );

        let mut user = load_user(self.user_repo.as_ref(), &cmd.user_id).await?;
        let accessory_id = AccessoryId::from_string(&cmd.accessory_id);
        let accessory = self
            .catalog_repo
            .find_accessory(&accessory_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(format!("accessory {}", cmd.accessory_id)))?;

        let already_owned = self
            .inventory_repo
            .find_owned_accessory(user.id(), &accessory_id)
            .await?
            .is_some();
        let remaining_cash = ShopDomainService::charge(
            &mut user,
            accessory.name(),
            accessory.price(),
            already_owned,
        )?;

        self.inventory_repo
            .purchase_accessory(&user, &accessory_id)
            .await?;

        info!(
            "Accessory purchased: {} by {} (remaining cash {})",
            accessory.name(),
            user.id(),
            remaining_cash
        );

        Ok(PurchaseResultDto {
            item_id: accessory.id().as_str().to_string(),
            item_name: accessory.name().to_string(),
            price: accessory.price(),
            remaining_cash,
        })
    }
}

// ============================================================
// Equipment
// ============================================================

pub struct EquipMascotCommandHandler {
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl EquipMascotCommandHandler {
    pub fn new(inventory_repo: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory_repo }
    }
}

#[async_trait]
impl CommandHandler<EquipMascotCommand> for EquipMascotCommandHandler {
    type Result = EquipMascotResult;

    async fn handle(&self, cmd: EquipMascotCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let mascot_id = MascotId::from_string(&cmd.mascot_id);

        let mut owned = self
            .inventory_repo
            .find_owned_mascot(&user_id, &mascot_id)
            .await?
            .ok_or_else(|| DomainError::NotOwned(format!("mascot {}", cmd.mascot_id)))?;

        self.inventory_repo
            .equip_mascot(&user_id, &mascot_id)
            .await?;
        owned.is_active = true;

        info!("Mascot equipped: {} for {}", owned.mascot.name(), user_id);
        Ok(OwnedMascotDto::from(&owned))
    }
}

pub struct EquipAccessoryCommandHandler {
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl EquipAccessoryCommandHandler {
    pub fn new(inventory_repo: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory_repo }
    }
}

#[async_trait]
impl CommandHandler<EquipAccessoryCommand> for EquipAccessoryCommandHandler {
    type Result = AccessoryStateResult;

    async fn handle(&self, cmd: EquipAccessoryCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let mut owned =
            load_owned_accessory(self.inventory_repo.as_ref(), &user_id, &cmd.accessory_id).await?;

        let slot = owned.accessory.slot();
        self.inventory_repo
            .equip_accessory(&user_id, owned.accessory.id(), slot)
            .await?;
        owned.is_active = true;

        info!(
            "Accessory equipped: {} in slot {} for {}",
            owned.accessory.name(),
            slot,
            user_id
        );
        Ok(OwnedAccessoryDto::from(&owned))
    }
}

pub struct UnequipAccessoryCommandHandler {
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl UnequipAccessoryCommandHandler {
    pub fn new(inventory_repo: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory_repo }
    }
}

#[async_trait]
impl CommandHandler<UnequipAccessoryCommand> for UnequipAccessoryCommandHandler {
    type Result = AccessoryStateResult;

    async fn handle(&self, cmd: UnequipAccessoryCommand) -> Result<Self::Result, DomainError> {
        let user_id = UserId::from_string(&cmd.user_id);
        let mut owned =
            load_owned_accessory(self.inventory_repo.as_ref(), &user_id, &cmd.accessory_id).await?;

        self.inventory_repo
            .unequip_accessory(&user_id, owned.accessory.id())
            .await?;
        owned.is_active = false;

        info!(
            "Accessory unequipped: {} for {}",
            owned.accessory.name(),
            user_id
        );
        Ok(OwnedAccessoryDto::from(&owned))
    }
}
