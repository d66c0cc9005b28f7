mod check_goal_handler;
mod community_handlers;
mod goal_handlers;
mod shop_handlers;
mod user_handlers;

#[cfg(test)]
mod tests;

pub use check_goal_handler::CheckGoalCommandHandler;
pub use community_handlers::{
    CreatePostCommandHandler, DeletePostCommandHandler, ReactToPostCommandHandler,
    UpdatePostCommandHandler,
};
pub use goal_handlers::{
    CreateGoalCommandHandler, DeleteGoalCommandHandler, UpdateGoalCommandHandler,
};
pub use shop_handlers::{
    BuyAccessoryCommandHandler, BuyMascotCommandHandler, EquipAccessoryCommandHandler,
    EquipMascotCommandHandler, UnequipAccessoryCommandHandler,
};
pub use user_handlers::{
    SocialLoginCommandHandler, UpdateProfileCommandHandler, WithdrawCommandHandler,
};
