mod catalog;
mod domain_service;
mod inventory;
mod repository;

pub use catalog::{Accessory, AccessorySlot, Mascot};
pub use domain_service::ShopDomainService;
pub use inventory::{OwnedAccessory, OwnedMascot};
pub use repository::{CatalogRepository, InventoryRepository};
