use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{
    CheckInStreakQueries, CommunityQueryService, GoalQueryService, ShopQueryService,
    UserQueryService,
};
use goalkeeper_domain::check_in::CheckInRepository;
use goalkeeper_domain::community::{ImageStore, PostRepository, ReactionRepository};
use goalkeeper_domain::goal::GoalRepository;
use goalkeeper_domain::shop::{CatalogRepository, InventoryRepository};
use goalkeeper_domain::user::UserRepository;
use goalkeeper_infrastructure::config::AppConfig;
use goalkeeper_infrastructure::persistence::Database;

/// Command handlers container
pub struct CommandHandlers {
    pub social_login: Arc<SocialLoginCommandHandler>,
    pub update_profile: Arc<UpdateProfileCommandHandler>,
    pub withdraw: Arc<WithdrawCommandHandler>,
    pub create_goal: Arc<CreateGoalCommandHandler>,
    pub update_goal: Arc<UpdateGoalCommandHandler>,
    pub delete_goal: Arc<DeleteGoalCommandHandler>,
    pub check_goal: Arc<CheckGoalCommandHandler>,
    pub buy_mascot: Arc<BuyMascotCommandHandler>,
    pub buy_accessory: Arc<BuyAccessoryCommandHandler>,
    pub equip_mascot: Arc<EquipMascotCommandHandler>,
    pub equip_accessory: Arc<EquipAccessoryCommandHandler>,
    pub unequip_accessory: Arc<UnequipAccessoryCommandHandler>,
    pub create_post: Arc<CreatePostCommandHandler>,
    pub update_post: Arc<UpdatePostCommandHandler>,
    pub delete_post: Arc<DeletePostCommandHandler>,
    pub react_to_post: Arc<ReactToPostCommandHandler>,
}

pub struct Runtime {
    pub pool: Arc<SqlitePool>,
    pub db: Arc<Database>,
    pub config: AppConfig,
}

pub struct Repositories {
    pub user: Arc<dyn UserRepository>,
    pub goal: Arc<dyn GoalRepository>,
    pub check_in: Arc<dyn CheckInRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub inventory: Arc<dyn InventoryRepository>,
    pub post: Arc<dyn PostRepository>,
    pub reaction: Arc<dyn ReactionRepository>,
    pub image_store: Arc<dyn ImageStore>,
}

pub struct Queries {
    pub user: Arc<UserQueryService>,
    pub goal: Arc<GoalQueryService>,
    pub streak: Arc<CheckInStreakQueries>,
    pub shop: Arc<ShopQueryService>,
    pub community: Arc<CommunityQueryService>,
}

pub struct AppState {
    pub runtime: Runtime,
    pub repositories: Repositories,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        crate::presentation::bootstrap::build_app_state(config).await
    }
}
