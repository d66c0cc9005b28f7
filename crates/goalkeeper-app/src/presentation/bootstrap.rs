use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::queries::{
    CheckInStreakQueries, CommunityQueryService, GoalQueryService, ShopQueryService,
    UserQueryService,
};
use crate::application::services::{seed_builtin_catalog, BuiltinCatalog};
use crate::presentation::state::{AppState, CommandHandlers, Queries, Repositories, Runtime};
use goalkeeper_domain::check_in::CheckInRepository;
use goalkeeper_domain::community::{ImageStore, PostRepository, ReactionRepository};
use goalkeeper_domain::goal::GoalRepository;
use goalkeeper_domain::shared::{Clock, SystemClock};
use goalkeeper_domain::shop::{CatalogRepository, InventoryRepository};
use goalkeeper_domain::user::UserRepository;
use goalkeeper_infrastructure::config::AppConfig;
use goalkeeper_infrastructure::persistence::{
    repositories::{
        SqliteCatalogRepository, SqliteCheckInRepository, SqliteGoalRepository,
        SqliteInventoryRepository, SqlitePostRepository, SqliteReactionRepository,
        SqliteUserRepository,
    },
    Database,
};
use goalkeeper_infrastructure::storage::LocalImageStore;

/// Open the configured database file and wire the application
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let db_path = config
        .database_path
        .to_str()
        .context("Database path is not valid UTF-8")?
        .to_string();
    info!("Database path: {}", db_path);

    info!("🔌 Connecting to database...");
    let started_at = Instant::now();
    let database = Database::new(&db_path)
        .await
        .context("Failed to open database")?;
    info!(
        "✓ Database connection established ({}ms)",
        started_at.elapsed().as_millis()
    );

    build_app_state_with(database, config, Arc::new(SystemClock)).await
}

/// Wire the application on top of an opened database and a clock
pub async fn build_app_state_with(
    database: Database,
    config: AppConfig,
    clock: Arc<dyn Clock>,
) -> anyhow::Result<AppState> {
    let startup_started_at = Instant::now();

    info!("🔄 Running migrations...");
    let started_at = Instant::now();
    database
        .run_migrations()
        .await
        .context("Failed to run migrations")?;
    info!(
        "✓ Migrations completed ({}ms)",
        started_at.elapsed().as_millis()
    );

    let boundary = config.day_boundary()?;
    let policy = config.rewards;
    info!(
        "Day boundary at UTC{:+} minutes; base reward {} cash / {} exp",
        boundary.offset_minutes(),
        policy.base_cash,
        policy.base_exp
    );

    let pool = Arc::new(database.pool().clone());

    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone())) as Arc<dyn UserRepository>;
    let goal_repo = Arc::new(SqliteGoalRepository::new(pool.clone())) as Arc<dyn GoalRepository>;
    let check_in_repo =
        Arc::new(SqliteCheckInRepository::new(pool.clone())) as Arc<dyn CheckInRepository>;
    let catalog_repo =
        Arc::new(SqliteCatalogRepository::new(pool.clone())) as Arc<dyn CatalogRepository>;
    let inventory_repo =
        Arc::new(SqliteInventoryRepository::new(pool.clone())) as Arc<dyn InventoryRepository>;
    let post_repo = Arc::new(SqlitePostRepository::new(pool.clone())) as Arc<dyn PostRepository>;
    let reaction_repo =
        Arc::new(SqliteReactionRepository::new(pool.clone())) as Arc<dyn ReactionRepository>;
    let image_store = Arc::new(LocalImageStore::new(
        config.upload_dir.clone(),
        &config.static_url_prefix,
    )) as Arc<dyn ImageStore>;

    info!("🌱 Seeding built-in catalog...");
    let started_at = Instant::now();
    let catalog = BuiltinCatalog::embedded()?;
    let starter_kit = seed_builtin_catalog(catalog_repo.clone(), &catalog)
        .await
        .context("Failed to seed built-in catalog")?;
    info!(
        "✓ Built-in catalog seeded ({}ms)",
        started_at.elapsed().as_millis()
    );

    let queries = Queries {
        user: Arc::new(UserQueryService::new(user_repo.clone())),
        goal: Arc::new(GoalQueryService::new(goal_repo.clone())),
        streak: Arc::new(CheckInStreakQueries::new(
            user_repo.clone(),
            goal_repo.clone(),
            check_in_repo.clone(),
            boundary,
        )),
        shop: Arc::new(ShopQueryService::new(
            catalog_repo.clone(),
            inventory_repo.clone(),
        )),
        community: Arc::new(CommunityQueryService::new(
            post_repo.clone(),
            reaction_repo.clone(),
            user_repo.clone(),
        )),
    };

    let command_handlers = CommandHandlers {
        social_login: Arc::new(SocialLoginCommandHandler::new(
            user_repo.clone(),
            catalog_repo.clone(),
            inventory_repo.clone(),
            starter_kit,
        )),
        update_profile: Arc::new(UpdateProfileCommandHandler::new(user_repo.clone())),
        withdraw: Arc::new(WithdrawCommandHandler::new(user_repo.clone())),
        create_goal: Arc::new(CreateGoalCommandHandler::new(
            user_repo.clone(),
            goal_repo.clone(),
        )),
        update_goal: Arc::new(UpdateGoalCommandHandler::new(goal_repo.clone())),
        delete_goal: Arc::new(DeleteGoalCommandHandler::new(goal_repo.clone())),
        check_goal: Arc::new(CheckGoalCommandHandler::new(
            user_repo.clone(),
            goal_repo.clone(),
            check_in_repo.clone(),
            clock,
            boundary,
            policy,
        )),
        buy_mascot: Arc::new(BuyMascotCommandHandler::new(
            user_repo.clone(),
            catalog_repo.clone(),
            inventory_repo.clone(),
        )),
        buy_accessory: Arc::new(BuyAccessoryCommandHandler::new(
            user_repo.clone(),
            catalog_repo.clone(),
            inventory_repo.clone(),
        )),
        equip_mascot: Arc::new(EquipMascotCommandHandler::new(inventory_repo.clone())),
        equip_accessory: Arc::new(EquipAccessoryCommandHandler::new(inventory_repo.clone())),
        unequip_accessory: Arc::new(UnequipAccessoryCommandHandler::new(inventory_repo.clone())),
        create_post: Arc::new(CreatePostCommandHandler::new(
            user_repo.clone(),
            post_repo.clone(),
            image_store.clone(),
        )),
        update_post: Arc::new(UpdatePostCommandHandler::new(
            user_repo.clone(),
            post_repo.clone(),
            reaction_repo.clone(),
            image_store.clone(),
        )),
        delete_post: Arc::new(DeletePostCommandHandler::new(
            post_repo.clone(),
            image_store.clone(),
        )),
        react_to_post: Arc::new(ReactToPostCommandHandler::new(
            post_repo.clone(),
            reaction_repo.clone(),
        )),
    };

    info!(
        "✅ App state ready ({}ms)",
        startup_started_at.elapsed().as_millis()
    );

    Ok(AppState {
        runtime: Runtime {
            pool,
            db: Arc::new(database),
            config,
        },
        repositories: Repositories {
            user: user_repo,
            goal: goal_repo,
            check_in: check_in_repo,
            catalog: catalog_repo,
            inventory: inventory_repo,
            post: post_repo,
            reaction: reaction_repo,
            image_store,
        },
        queries,
        command_handlers,
    })
}
