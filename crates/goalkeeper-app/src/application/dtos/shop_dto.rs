use serde::{Deserialize, Serialize};

use goalkeeper_domain::shop::{Accessory, Mascot, OwnedAccessory, OwnedMascot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MascotDto {
    pub id: String,
    pub name: String,
    pub species: String,
    pub description: String,
    pub image_url: String,
    pub locked_image_url: Option<String>,
    pub price: i64,
    pub slot_type: String,
}

impl From<&Mascot> for MascotDto {
    fn from(mascot: &Mascot) -> Self {
        Self {
            id: mascot.id().as_str().to_string(),
            name: mascot.name().to_string(),
            species: mascot.species().to_string(),
            description: mascot.description().to_string(),
            image_url: mascot.image_url().to_string(),
            locked_image_url: mascot.locked_image_url().map(str::to_string),
            price: mascot.price(),
            slot_type: mascot.slot_type().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessoryDto {
    pub id: String,
    pub name: String,
    pub slot: String,
    pub image_url: String,
    pub price: i64,
}

impl From<&Accessory> for AccessoryDto {
    fn from(accessory: &Accessory) -> Self {
        Self {
            id: accessory.id().as_str().to_string(),
            name: accessory.name().to_string(),
            slot: accessory.slot().as_str().to_string(),
            image_url: accessory.image_url().to_string(),
            price: accessory.price(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedMascotDto {
    #[serde(flatten)]
    pub mascot: MascotDto,
    pub acquired_at: String,
    pub is_active: bool,
}

impl From<&OwnedMascot> for OwnedMascotDto {
    fn from(owned: &OwnedMascot) -> Self {
        Self {
            mascot: MascotDto::from(&owned.mascot),
            acquired_at: owned.acquired_at.to_rfc3339(),
            is_active: owned.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedAccessoryDto {
    #[serde(flatten)]
    pub accessory: AccessoryDto,
    pub acquired_at: String,
    pub is_active: bool,
}

impl From<&OwnedAccessory> for OwnedAccessoryDto {
    fn from(owned: &OwnedAccessory) -> Self {
        Self {
            accessory: AccessoryDto::from(&owned.accessory),
            acquired_at: owned.acquired_at.to_rfc3339(),
            is_active: owned.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseResultDto {
    pub item_id: String,
    pub item_name: String,
    pub price: i64,
    pub remaining_cash: i64,
}
