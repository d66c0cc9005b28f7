use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::{AccessoryId, DomainError, MascotId};

/// Body position an accessory is worn in; one active accessory per slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorySlot {
    Background,
    Head,
    Face,
    Neck,
    Body,
    Hand,
}

impl AccessorySlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessorySlot::Background => "background",
            AccessorySlot::Head => "head",
            AccessorySlot::Face => "face",
            AccessorySlot::Neck => "neck",
            AccessorySlot::Body => "body",
            AccessorySlot::Hand => "hand",
        }
    }
}

impl fmt::Display for AccessorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessorySlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "background" => Ok(AccessorySlot::Background),
            "head" => Ok(AccessorySlot::Head),
            "face" => Ok(AccessorySlot::Face),
            "neck" => Ok(AccessorySlot::Neck),
            "body" => Ok(AccessorySlot::Body),
            "hand" => Ok(AccessorySlot::Hand),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown accessory slot: {other}"
            ))),
        }
    }
}

fn validate_name(kind: &str, name: String) -> Result<String, DomainError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(DomainError::Validation(format!("{kind} name cannot be empty")));
    }
    Ok(name)
}

fn validate_price(price: i64) -> Result<i64, DomainError> {
    if price < 0 {
        return Err(DomainError::Validation(format!(
            "Price cannot be negative: {price}"
        )));
    }
    Ok(price)
}

/// Catalog mascot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mascot {
    id: MascotId,
    name: String,
    species: String,
    description: String,
    image_url: String,
    locked_image_url: Option<String>,
    price: i64,
    slot_type: String,
}

impl Mascot {
    pub const DEFAULT_SLOT_TYPE: &'static str = "body";

    pub fn new(
        name: String,
        species: String,
        description: String,
        image_url: String,
        locked_image_url: Option<String>,
        price: i64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: MascotId::new(),
            name: validate_name("Mascot", name)?,
            species,
            description,
            image_url,
            locked_image_url,
            price: validate_price(price)?,
            slot_type: Self::DEFAULT_SLOT_TYPE.to_string(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: MascotId,
        name: String,
        species: String,
        description: String,
        image_url: String,
        locked_image_url: Option<String>,
        price: i64,
        slot_type: String,
    ) -> Self {
        Self {
            id,
            name,
            species,
            description,
            image_url,
            locked_image_url,
            price,
            slot_type,
        }
    }

    pub fn id(&self) -> &MascotId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn locked_image_url(&self) -> Option<&str> {
        self.locked_image_url.as_deref()
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn slot_type(&self) -> &str {
        &self.slot_type
    }
}

/// Catalog accessory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessory {
    id: AccessoryId,
    name: String,
    slot: AccessorySlot,
    image_url: String,
    price: i64,
}

impl Accessory {
    pub fn new(
        name: String,
        slot: AccessorySlot,
        image_url: String,
        price: i64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: AccessoryId::new(),
            name: validate_name("Accessory", name)?,
            slot,
            image_url,
            price: validate_price(price)?,
        })
    }

    pub fn restore(
        id: AccessoryId,
        name: String,
        slot: AccessorySlot,
        image_url: String,
        price: i64,
    ) -> Self {
        Self {
            id,
            name,
            slot,
            image_url,
            price,
        }
    }

    pub fn id(&self) -> &AccessoryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> AccessorySlot {
        self.slot
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn price(&self) -> i64 {
        self.price
    }
}
