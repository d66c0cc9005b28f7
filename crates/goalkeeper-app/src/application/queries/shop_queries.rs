use std::sync::Arc;

use crate::application::dtos::{AccessoryDto, MascotDto, OwnedAccessoryDto, OwnedMascotDto};
use goalkeeper_domain::shared::{DomainError, UserId};
use goalkeeper_domain::shop::{CatalogRepository, InventoryRepository};

pub struct ShopQueryService {
    catalog_repo: Arc<dyn CatalogRepository>,
    inventory_repo: Arc<dyn InventoryRepository>,
}

impl ShopQueryService {
    pub fn new(
        catalog_repo: Arc<dyn CatalogRepository>,
        inventory_repo: Arc<dyn InventoryRepository>,
    ) -> Self {
        Self {
            catalog_repo,
            inventory_repo,
        }
    }

    pub async fn list_mascots(&self) -> Result<Vec<MascotDto>, DomainError> {
        let mascots = self.catalog_repo.list_mascots().await?;
        Ok(mascots.iter().map(MascotDto::from).collect())
    }

    pub async fn list_accessories(&self) -> Result<Vec<AccessoryDto>, DomainError> {
        let accessories = self.catalog_repo.list_accessories().await?;
        Ok(accessories.iter().map(AccessoryDto::from).collect())
    }

    pub async fn my_mascots(&self, user_id: &str) -> Result<Vec<OwnedMascotDto>, DomainError> {
        let owned = self
            .inventory_repo
            .find_owned_mascots(&UserId::from_string(user_id))
            .await?;
        Ok(owned.iter().map(OwnedMascotDto::from).collect())
    }

    pub async fn my_accessories(
        &self,
        user_id: &str,
    ) -> Result<Vec<OwnedAccessoryDto>, DomainError> {
        let owned = self
            .inventory_repo
            .find_owned_accessories(&UserId::from_string(user_id))
            .await?;
        Ok(owned.iter().map(OwnedAccessoryDto::from).collect())
    }

    pub async fn equipped_mascot(
        &self,
        user_id: &str,
    ) -> Result<Option<OwnedMascotDto>, DomainError> {
        let owned = self
            .inventory_repo
            .find_owned_mascots(&UserId::from_string(user_id))
            .await?;
        Ok(owned
            .iter()
            .find(|m| m.is_active)
            .map(OwnedMascotDto::from))
    }

    pub async fn equipped_accessories(
        &self,
        user_id: &str,
    ) -> Result<Vec<OwnedAccessoryDto>, DomainError> {
        let owned = self
            .inventory_repo
            .find_owned_accessories(&UserId::from_string(user_id))
            .await?;
        Ok(owned
            .iter()
            .filter(|a| a.is_active)
            .map(OwnedAccessoryDto::from)
            .collect())
    }
}
