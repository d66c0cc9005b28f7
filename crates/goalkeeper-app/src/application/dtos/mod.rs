mod check_in_dto;
mod community_dto;
mod goal_dto;
mod shop_dto;
mod streak_dto;
mod user_dto;

pub use check_in_dto::*;
pub use community_dto::*;
pub use goal_dto::*;
pub use shop_dto::*;
pub use streak_dto::*;
pub use user_dto::*;
