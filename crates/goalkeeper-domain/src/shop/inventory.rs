use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{Accessory, Mascot};
use crate::shared::UserId;

/// A mascot in a user's collection, joined with its catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedMascot {
    pub user_id: UserId,
    pub mascot: Mascot,
    pub acquired_at: DateTime<Utc>,
    pub is_active: bool,
}

/// An accessory in a user's collection, joined with its catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedAccessory {
    pub user_id: UserId,
    pub accessory: Accessory,
    pub acquired_at: DateTime<Utc>,
    pub is_active: bool,
}
