use crate::application::commands::command_handler::Command;
use crate::application::dtos::{OwnedAccessoryDto, OwnedMascotDto, PurchaseResultDto};

#[derive(Debug, Clone)]
pub struct BuyMascotCommand {
    pub user_id: String,
    pub mascot_id: String,
}

impl Command for BuyMascotCommand {}

#[derive(Debug, Clone)]
pub struct BuyAccessoryCommand {
    pub user_id: String,
    pub accessory_id: String,
}

impl Command for BuyAccessoryCommand {}

pub type BuyItemResult = PurchaseResultDto;

#[derive(Debug, Clone)]
pub struct EquipMascotCommand {
    pub user_id: String,
    pub mascot_id: String,
}

impl Command for EquipMascotCommand {}

pub type EquipMascotResult = OwnedMascotDto;

#[derive(Debug, Clone)]
pub struct EquipAccessoryCommand {
    pub user_id: String,
    pub accessory_id: String,
}

impl Command for EquipAccessoryCommand {}

#[derive(Debug, Clone)]
pub struct UnequipAccessoryCommand {
    pub user_id: String,
    pub accessory_id: String,
}

impl Command for UnequipAccessoryCommand {}

pub type AccessoryStateResult = OwnedAccessoryDto;
