use async_trait::async_trait;

use super::{Accessory, AccessorySlot, Mascot, OwnedAccessory, OwnedMascot};
use crate::shared::{AccessoryId, DomainError, MascotId, UserId};
use crate::user::User;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_mascots(&self) -> Result<Vec<Mascot>, DomainError>;
    async fn list_accessories(&self) -> Result<Vec<Accessory>, DomainError>;
    async fn find_mascot(&self, id: &MascotId) -> Result<Option<Mascot>, DomainError>;
    async fn find_accessory(&self, id: &AccessoryId) -> Result<Option<Accessory>, DomainError>;
    async fn find_mascot_by_name(&self, name: &str) -> Result<Option<Mascot>, DomainError>;
    async fn find_accessory_by_name(&self, name: &str) -> Result<Option<Accessory>, DomainError>;

    /// Insert unless an entry with the same name exists; returns true if inserted
    async fn insert_mascot_if_absent(&self, mascot: &Mascot) -> Result<bool, DomainError>;
    async fn insert_accessory_if_absent(&self, accessory: &Accessory) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find_owned_mascots(&self, user_id: &UserId) -> Result<Vec<OwnedMascot>, DomainError>;
    async fn find_owned_mascot(
        &self,
        user_id: &UserId,
        mascot_id: &MascotId,
    ) -> Result<Option<OwnedMascot>, DomainError>;
    async fn find_owned_accessories(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OwnedAccessory>, DomainError>;
    async fn find_owned_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
    ) -> Result<Option<OwnedAccessory>, DomainError>;

    /// Save the user's new balance and add the mascot as inactive, atomically
    async fn purchase_mascot(&self, user: &User, mascot_id: &MascotId) -> Result<(), DomainError>;

    /// Save the user's new balance and add the accessory as inactive, atomically
    async fn purchase_accessory(
        &self,
        user: &User,
        accessory_id: &AccessoryId,
    ) -> Result<(), DomainError>;

    /// Give a mascot for free if not owned yet; `equip` makes it the active one.
    /// Returns true when a new ownership row was created.
    async fn grant_mascot(
        &self,
        user_id: &UserId,
        mascot_id: &MascotId,
        equip: bool,
    ) -> Result<bool, DomainError>;

    /// Give an accessory for free if not owned yet; `equip` activates it in its slot.
    /// Returns true when a new ownership row was created.
    async fn grant_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
        slot: AccessorySlot,
        equip: bool,
    ) -> Result<bool, DomainError>;

    /// Deactivate every owned mascot, then activate `mascot_id`
    async fn equip_mascot(&self, user_id: &UserId, mascot_id: &MascotId) -> Result<(), DomainError>;

    /// Deactivate owned accessories in `slot`, then activate `accessory_id`
    async fn equip_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
        slot: AccessorySlot,
    ) -> Result<(), DomainError>;

    async fn unequip_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
    ) -> Result<(), DomainError>;
}
