use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use goalkeeper_domain::shared::DomainError;
use goalkeeper_domain::shop::{Accessory, AccessorySlot, CatalogRepository, Mascot};

#[derive(Debug, Deserialize)]
struct BuiltinMascotConfig {
    name: String,
    species: String,
    description: String,
    image_url: String,
    locked_image_url: Option<String>,
    price: i64,
}

#[derive(Debug, Deserialize)]
struct BuiltinAccessoryConfig {
    name: String,
    slot: String,
    image_url: String,
    price: i64,
}

#[derive(Debug, Deserialize)]
pub struct BuiltinCatalog {
    starter_mascot: String,
    starter_background: String,
    mascots: Vec<BuiltinMascotConfig>,
    accessories: Vec<BuiltinAccessoryConfig>,
}

/// Names of the items every user receives on login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarterKit {
    pub mascot_name: String,
    pub background_name: String,
}

impl BuiltinCatalog {
    pub fn embedded() -> Result<Self, DomainError> {
        const RAW_CATALOG: &str = include_str!("../../../../../config/catalog/builtin_catalog.json");
        Self::parse(RAW_CATALOG)
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let catalog: Self = serde_json::from_str(raw).map_err(|e| {
            DomainError::Deserialization(format!("Failed to parse builtin catalog: {e}"))
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), DomainError> {
        if !self.mascots.iter().any(|m| m.name == self.starter_mascot) {
            return Err(DomainError::Validation(format!(
                "Starter mascot '{}' is not in the catalog",
                self.starter_mascot
            )));
        }

        let background = self
            .accessories
            .iter()
            .find(|a| a.name == self.starter_background)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "Starter background '{}' is not in the catalog",
                    self.starter_background
                ))
            })?;
        if AccessorySlot::from_str(&background.slot)? != AccessorySlot::Background {
            return Err(DomainError::Validation(format!(
                "Starter background '{}' is not a background",
                self.starter_background
            )));
        }

        Ok(())
    }

    pub fn starter_kit(&self) -> StarterKit {
        StarterKit {
            mascot_name: self.starter_mascot.clone(),
            background_name: self.starter_background.clone(),
        }
    }
}

/// Ensure built-in mascots and accessories exist in the database.
///
/// Entries are matched by name, so re-running never duplicates or
/// overwrites rows already present.
pub async fn seed_builtin_catalog(
    catalog_repo: Arc<dyn CatalogRepository>,
    catalog: &BuiltinCatalog,
) -> Result<StarterKit, DomainError> {
    let mut seeded_count = 0;

    for config in &catalog.mascots {
        let mascot = Mascot::new(
            config.name.clone(),
            config.species.clone(),
            config.description.clone(),
            config.image_url.clone(),
            config.locked_image_url.clone(),
            config.price,
        )?;
        if catalog_repo.insert_mascot_if_absent(&mascot).await? {
            seeded_count += 1;
            info!("Seeded built-in mascot: {}", config.name);
        }
    }

    for config in &catalog.accessories {
        let accessory = Accessory::new(
            config.name.clone(),
            AccessorySlot::from_str(&config.slot)?,
            config.image_url.clone(),
            config.price,
        )?;
        if catalog_repo.insert_accessory_if_absent(&accessory).await? {
            seeded_count += 1;
            info!("Seeded built-in accessory: {}", config.name);
        }
    }

    if seeded_count > 0 {
        info!("Seeded {} built-in catalog item(s)", seeded_count);
    }

    Ok(catalog.starter_kit())
}
