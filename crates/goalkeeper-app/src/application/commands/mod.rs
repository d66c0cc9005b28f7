pub mod command_handler;
pub mod community_commands;
pub mod goal_commands;
pub mod handlers;
pub mod shop_commands;
pub mod user_commands;

pub use command_handler::{Command, CommandHandler};
pub use community_commands::*;
pub use goal_commands::*;
pub use shop_commands::*;
pub use user_commands::*;
