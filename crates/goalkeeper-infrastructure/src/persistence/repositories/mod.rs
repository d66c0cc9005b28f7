pub mod catalog_repo;
pub mod check_in_repo;
pub mod goal_repo;
pub mod inventory_repo;
pub mod post_repo;
pub mod user_repo;

pub use catalog_repo::SqliteCatalogRepository;
pub use check_in_repo::SqliteCheckInRepository;
pub use goal_repo::SqliteGoalRepository;
pub use inventory_repo::SqliteInventoryRepository;
pub use post_repo::{SqlitePostRepository, SqliteReactionRepository};
pub use user_repo::SqliteUserRepository;
