use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::*;
use crate::application::commands::*;
use crate::application::services::{seed_builtin_catalog, BuiltinCatalog, StarterKit};
use goalkeeper_domain::check_in::{
    CheckInDaySummary, CheckInRecord, CheckInRepository, RewardPolicy,
};
use goalkeeper_domain::community::{
    ImageStore, Post, PostRepository, Reaction, ReactionAction, ReactionRepository,
};
use goalkeeper_domain::goal::{Goal, GoalPeriod, GoalRepository};
use goalkeeper_domain::shared::{
    AccessoryId, Clock, DayBoundary, DomainError, GoalId, MascotId, PostId, UserId,
};
use goalkeeper_domain::shop::{
    Accessory, AccessorySlot, CatalogRepository, InventoryRepository, Mascot, OwnedAccessory,
    OwnedMascot,
};
use goalkeeper_domain::user::{SocialProfile, SocialProvider, User, UserRepository};

// Mock repositories and services for testing

struct MockUserRepository {
    users: tokio::sync::RwLock<HashMap<String, User>>,
}

impl MockUserRepository {
    fn new() -> Self {
        Self {
            users: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, id: &UserId) -> User {
        self.users.read().await.get(id.as_str()).cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl UserRepository for MockUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users.insert(user.id().as_str().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id.as_str()).cloned())
    }

    async fn find_by_provider(
        &self,
        provider: SocialProvider,
        subject: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.provider() == provider && u.provider_subject() == subject)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        users
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))
    }
}

struct MockGoalRepository {
    goals: tokio::sync::RwLock<HashMap<String, Goal>>,
}

impl MockGoalRepository {
    fn new() -> Self {
        Self {
            goals: tokio::sync::RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, id: &GoalId) -> Option<Goal> {
        self.goals.read().await.get(id.as_str()).cloned()
    }
}

#[async_trait::async_trait]
impl GoalRepository for MockGoalRepository {
    async fn save(&self, goal: &Goal) -> Result<(), DomainError> {
        let mut goals = self.goals.write().await;
        goals.insert(goal.id().as_str().to_string(), goal.clone());
        Ok(())
    }

    async fn find_owned(&self, id: &GoalId, owner: &UserId) -> Result<Option<Goal>, DomainError> {
        let goals = self.goals.read().await;
        Ok(goals
            .get(id.as_str())
            .filter(|g| g.is_owned_by(owner))
            .cloned())
    }

    async fn find_by_user(&self, owner: &UserId) -> Result<Vec<Goal>, DomainError> {
        let goals = self.goals.read().await;
        Ok(goals
            .values()
            .filter(|g| g.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &GoalId) -> Result<(), DomainError> {
        let mut goals = self.goals.write().await;
        goals.remove(id.as_str());
        Ok(())
    }
}

/// Commit writes through to the user and goal mocks, like the real transaction
struct MockCheckInRepository {
    users: Arc<MockUserRepository>,
    goals: Arc<MockGoalRepository>,
    records: tokio::sync::RwLock<Vec<CheckInRecord>>,
}

impl MockCheckInRepository {
    fn new(users: Arc<MockUserRepository>, goals: Arc<MockGoalRepository>) -> Self {
        Self {
            users,
            goals,
            records: tokio::sync::RwLock::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl CheckInRepository for MockCheckInRepository {
    async fn commit(
        &self,
        goal: &Goal,
        user: &User,
        record: &CheckInRecord,
    ) -> Result<(), DomainError> {
        self.goals.save(goal).await?;
        self.users.save(user).await?;
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn daily_summaries(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CheckInDaySummary>, DomainError> {
        let records = self.records.read().await;
        let mut by_date: BTreeMap<NaiveDate, CheckInDaySummary> = BTreeMap::new();
        for record in records.iter().filter(|r| {
            r.user_id() == user_id && r.check_in_date() >= start && r.check_in_date() <= end
        }) {
            let summary = by_date
                .entry(record.check_in_date())
                .or_insert(CheckInDaySummary {
                    date: record.check_in_date(),
                    check_ins: 0,
                    gained_cash: 0,
                    gained_exp: 0,
                });
            summary.check_ins += 1;
            summary.gained_cash += record.gained_cash();
            summary.gained_exp += record.gained_exp();
        }
        Ok(by_date.into_values().collect())
    }

    async fn active_dates(&self, user_id: &UserId) -> Result<Vec<NaiveDate>, DomainError> {
        let records = self.records.read().await;
        let mut dates: Vec<NaiveDate> = records
            .iter()
            .filter(|r| r.user_id() == user_id)
            .map(|r| r.check_in_date())
            .collect();
        dates.sort();
        dates.dedup();
        Ok(dates)
    }

    async fn count_by_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.user_id() == user_id).count() as u64)
    }

    async fn find_recent(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<CheckInRecord>, DomainError> {
        let records = self.records.read().await;
        let mut recent: Vec<CheckInRecord> = records
            .iter()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        recent.sort_by_key(|r| std::cmp::Reverse(r.checked_at()));
        recent.truncate(limit as usize);
        Ok(recent)
    }
}

struct MockCatalogRepository {
    mascots: tokio::sync::RwLock<Vec<Mascot>>,
    accessories: tokio::sync::RwLock<Vec<Accessory>>,
}

impl MockCatalogRepository {
    fn new() -> Self {
        Self {
            mascots: tokio::sync::RwLock::new(Vec::new()),
            accessories: tokio::sync::RwLock::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn list_mascots(&self) -> Result<Vec<Mascot>, DomainError> {
        Ok(self.mascots.read().await.clone())
    }

    async fn list_accessories(&self) -> Result<Vec<Accessory>, DomainError> {
        Ok(self.accessories.read().await.clone())
    }

    async fn find_mascot(&self, id: &MascotId) -> Result<Option<Mascot>, DomainError> {
        let mascots = self.mascots.read().await;
        Ok(mascots.iter().find(|m| m.id() == id).cloned())
    }

    async fn find_accessory(&self, id: &AccessoryId) -> Result<Option<Accessory>, DomainError> {
        let accessories = self.accessories.read().await;
        Ok(accessories.iter().find(|a| a.id() == id).cloned())
    }

    async fn find_mascot_by_name(&self, name: &str) -> Result<Option<Mascot>, DomainError> {
        let mascots = self.mascots.read().await;
        Ok(mascots.iter().find(|m| m.name() == name).cloned())
    }

    async fn find_accessory_by_name(&self, name: &str) -> Result<Option<Accessory>, DomainError> {
        let accessories = self.accessories.read().await;
        Ok(accessories.iter().find(|a| a.name() == name).cloned())
    }

    async fn insert_mascot_if_absent(&self, mascot: &Mascot) -> Result<bool, DomainError> {
        let mut mascots = self.mascots.write().await;
        if mascots.iter().any(|m| m.name() == mascot.name()) {
            return Ok(false);
        }
        mascots.push(mascot.clone());
        Ok(true)
    }

    async fn insert_accessory_if_absent(&self, accessory: &Accessory) -> Result<bool, DomainError> {
        let mut accessories = self.accessories.write().await;
        if accessories.iter().any(|a| a.name() == accessory.name()) {
            return Ok(false);
        }
        accessories.push(accessory.clone());
        Ok(true)
    }
}

struct MockInventoryRepository {
    catalog: Arc<MockCatalogRepository>,
    users: Arc<MockUserRepository>,
    mascots: tokio::sync::RwLock<Vec<OwnedMascot>>,
    accessories: tokio::sync::RwLock<Vec<OwnedAccessory>>,
}

impl MockInventoryRepository {
    fn new(catalog: Arc<MockCatalogRepository>, users: Arc<MockUserRepository>) -> Self {
        Self {
            catalog,
            users,
            mascots: tokio::sync::RwLock::new(Vec::new()),
            accessories: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    async fn add_mascot(&self, user_id: &UserId, mascot_id: &MascotId) -> Result<(), DomainError> {
        let mascot = self
            .catalog
            .find_mascot(mascot_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(mascot_id.to_string()))?;
        self.mascots.write().await.push(OwnedMascot {
            user_id: user_id.clone(),
            mascot,
            acquired_at: Utc::now(),
            is_active: false,
        });
        Ok(())
    }

    async fn add_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
    ) -> Result<(), DomainError> {
        let accessory = self
            .catalog
            .find_accessory(accessory_id)
            .await?
            .ok_or_else(|| DomainError::ItemNotFound(accessory_id.to_string()))?;
        self.accessories.write().await.push(OwnedAccessory {
            user_id: user_id.clone(),
            accessory,
            acquired_at: Utc::now(),
            is_active: false,
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventoryRepository for MockInventoryRepository {
    async fn find_owned_mascots(&self, user_id: &UserId) -> Result<Vec<OwnedMascot>, DomainError> {
        let mascots = self.mascots.read().await;
        Ok(mascots
            .iter()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_owned_mascot(
        &self,
        user_id: &UserId,
        mascot_id: &MascotId,
    ) -> Result<Option<OwnedMascot>, DomainError> {
        let mascots = self.mascots.read().await;
        Ok(mascots
            .iter()
            .find(|m| &m.user_id == user_id && m.mascot.id() == mascot_id)
            .cloned())
    }

    async fn find_owned_accessories(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OwnedAccessory>, DomainError> {
        let accessories = self.accessories.read().await;
        Ok(accessories
            .iter()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_owned_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
    ) -> Result<Option<OwnedAccessory>, DomainError> {
        let accessories = self.accessories.read().await;
        Ok(accessories
            .iter()
            .find(|a| &a.user_id == user_id && a.accessory.id() == accessory_id)
            .cloned())
    }

    async fn purchase_mascot(&self, user: &User, mascot_id: &MascotId) -> Result<(), DomainError> {
        if self.find_owned_mascot(user.id(), mascot_id).await?.is_some() {
            return Err(DomainError::AlreadyOwned(mascot_id.to_string()));
        }
        self.users.save(user).await?;
        self.add_mascot(user.id(), mascot_id).await
    }

    async fn purchase_accessory(
        &self,
        user: &User,
        accessory_id: &AccessoryId,
    ) -> Result<(), DomainError> {
        if self
            .find_owned_accessory(user.id(), accessory_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyOwned(accessory_id.to_string()));
        }
        self.users.save(user).await?;
        self.add_accessory(user.id(), accessory_id).await
    }

    async fn grant_mascot(
        &self,
        user_id: &UserId,
        mascot_id: &MascotId,
        equip: bool,
    ) -> Result<bool, DomainError> {
        if self.find_owned_mascot(user_id, mascot_id).await?.is_some() {
            return Ok(false);
        }
        self.add_mascot(user_id, mascot_id).await?;
        if equip {
            self.equip_mascot(user_id, mascot_id).await?;
        }
        Ok(true)
    }

    async fn grant_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
        slot: AccessorySlot,
        equip: bool,
    ) -> Result<bool, DomainError> {
        if self
            .find_owned_accessory(user_id, accessory_id)
            .await?
            .is_some()
        {
            return Ok(false);
        }
        self.add_accessory(user_id, accessory_id).await?;
        if equip {
            self.equip_accessory(user_id, accessory_id, slot).await?;
        }
        Ok(true)
    }

    async fn equip_mascot(&self, user_id: &UserId, mascot_id: &MascotId) -> Result<(), DomainError> {
        let mut mascots = self.mascots.write().await;
        for owned in mascots.iter_mut().filter(|m| &m.user_id == user_id) {
            owned.is_active = owned.mascot.id() == mascot_id;
        }
        Ok(())
    }

    async fn equip_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
        slot: AccessorySlot,
    ) -> Result<(), DomainError> {
        let mut accessories = self.accessories.write().await;
        for owned in accessories
            .iter_mut()
            .filter(|a| &a.user_id == user_id && a.accessory.slot() == slot)
        {
            owned.is_active = owned.accessory.id() == accessory_id;
        }
        Ok(())
    }

    async fn unequip_accessory(
        &self,
        user_id: &UserId,
        accessory_id: &AccessoryId,
    ) -> Result<(), DomainError> {
        let mut accessories = self.accessories.write().await;
        if let Some(owned) = accessories
            .iter_mut()
            .find(|a| &a.user_id == user_id && a.accessory.id() == accessory_id)
        {
            owned.is_active = false;
        }
        Ok(())
    }
}

struct MockPostRepository {
    posts: tokio::sync::RwLock<HashMap<String, Post>>,
    fail_saves: AtomicBool,
}

impl MockPostRepository {
    fn new() -> Self {
        Self {
            posts: tokio::sync::RwLock::new(HashMap::new()),
            fail_saves: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl PostRepository for MockPostRepository {
    async fn save(&self, post: &Post) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Repository("disk full".to_string()));
        }
        let mut posts = self.posts.write().await;
        posts.insert(post.id().as_str().to_string(), post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.get(id.as_str()).cloned())
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        all.sort_by_key(|p| std::cmp::Reverse(p.created_at()));
        Ok(all
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn delete(&self, id: &PostId) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        posts
            .remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))
    }
}

struct MockReactionRepository {
    reactions: tokio::sync::RwLock<HashMap<(String, String), Reaction>>,
}

impl MockReactionRepository {
    fn new() -> Self {
        Self {
            reactions: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

fn reaction_key(post_id: &PostId, user_id: &UserId) -> (String, String) {
    (post_id.as_str().to_string(), user_id.as_str().to_string())
}

#[async_trait::async_trait]
impl ReactionRepository for MockReactionRepository {
    async fn find(
        &self,
        post_id: &PostId,
        user_id: &UserId,
    ) -> Result<Option<Reaction>, DomainError> {
        let reactions = self.reactions.read().await;
        Ok(reactions.get(&reaction_key(post_id, user_id)).cloned())
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Reaction>, DomainError> {
        let reactions = self.reactions.read().await;
        Ok(reactions
            .values()
            .filter(|r| &r.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, reaction: &Reaction) -> Result<(), DomainError> {
        let mut reactions = self.reactions.write().await;
        reactions.insert(
            reaction_key(&reaction.post_id, &reaction.user_id),
            reaction.clone(),
        );
        Ok(())
    }

    async fn delete(&self, post_id: &PostId, user_id: &UserId) -> Result<(), DomainError> {
        let mut reactions = self.reactions.write().await;
        reactions.remove(&reaction_key(post_id, user_id));
        Ok(())
    }
}

struct MockImageStore {
    stored: tokio::sync::RwLock<Vec<String>>,
    removed: tokio::sync::RwLock<Vec<String>>,
    reuse_names: AtomicBool,
}

impl MockImageStore {
    fn new() -> Self {
        Self {
            stored: tokio::sync::RwLock::new(Vec::new()),
            removed: tokio::sync::RwLock::new(Vec::new()),
            reuse_names: AtomicBool::new(false),
        }
    }

    async fn removed(&self) -> Vec<String> {
        self.removed.read().await.clone()
    }
}

#[async_trait::async_trait]
impl ImageStore for MockImageStore {
    async fn store(&self, original_filename: &str, _bytes: &[u8]) -> Result<String, DomainError> {
        let mut stored = self.stored.write().await;
        let url = if self.reuse_names.load(Ordering::SeqCst) {
            format!("/static/{}", original_filename)
        } else {
            format!("/static/{}-{}", stored.len(), original_filename)
        };
        stored.push(url.clone());
        Ok(url)
    }

    async fn remove(&self, public_url: &str) -> Result<(), DomainError> {
        self.removed.write().await.push(public_url.to_string());
        Ok(())
    }
}

#[derive(Debug)]
struct FixedClock {
    now: std::sync::RwLock<DateTime<Utc>>,
}

impl FixedClock {
    fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::RwLock::new(now),
        }
    }

    fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

// Fixtures

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, day, hour, 0, 0).unwrap()
}

fn kakao_profile(subject: &str) -> SocialProfile {
    SocialProfile::new(
        SocialProvider::Kakao,
        subject.to_string(),
        Some(format!("user-{subject}")),
        None,
    )
    .unwrap()
}

async fn create_user(users: &MockUserRepository, subject: &str) -> User {
    let user = User::register(&kakao_profile(subject));
    users.save(&user).await.unwrap();
    user
}

async fn create_goal(goals: &MockGoalRepository, user: &User, title: &str) -> Goal {
    let goal = Goal::new(
        user.id().clone(),
        title.to_string(),
        "health".to_string(),
        GoalPeriod::Daily,
        None,
        None,
    )
    .unwrap();
    goals.save(&goal).await.unwrap();
    goal
}

struct CheckInFixture {
    users: Arc<MockUserRepository>,
    goals: Arc<MockGoalRepository>,
    check_ins: Arc<MockCheckInRepository>,
    clock: Arc<FixedClock>,
    handler: CheckGoalCommandHandler,
}

fn check_in_fixture() -> CheckInFixture {
    let users = Arc::new(MockUserRepository::new());
    let goals = Arc::new(MockGoalRepository::new());
    let check_ins = Arc::new(MockCheckInRepository::new(users.clone(), goals.clone()));
    let clock = Arc::new(FixedClock::at(at(1, 8)));
    let handler = CheckGoalCommandHandler::new(
        users.clone(),
        goals.clone(),
        check_ins.clone(),
        clock.clone(),
        DayBoundary::utc(),
        RewardPolicy::default(),
    );

    CheckInFixture {
        users,
        goals,
        check_ins,
        clock,
        handler,
    }
}

fn check(user: &User, goal: &Goal) -> CheckGoalCommand {
    CheckGoalCommand {
        user_id: user.id().as_str().to_string(),
        goal_id: goal.id().as_str().to_string(),
    }
}

struct ShopFixture {
    users: Arc<MockUserRepository>,
    catalog: Arc<MockCatalogRepository>,
    inventory: Arc<MockInventoryRepository>,
}

fn shop_fixture() -> ShopFixture {
    let users = Arc::new(MockUserRepository::new());
    let catalog = Arc::new(MockCatalogRepository::new());
    let inventory = Arc::new(MockInventoryRepository::new(catalog.clone(), users.clone()));
    ShopFixture {
        users,
        catalog,
        inventory,
    }
}

async fn user_with_cash(users: &MockUserRepository, subject: &str, cash: i64) -> User {
    let mut user = create_user(users, subject).await;
    user.grant_reward(cash, 0).unwrap();
    users.save(&user).await.unwrap();
    user
}

async fn add_mascot(catalog: &MockCatalogRepository, name: &str, price: i64) -> Mascot {
    let mascot = Mascot::new(
        name.to_string(),
        "hippo".to_string(),
        String::new(),
        format!("/static/{name}.png"),
        None,
        price,
    )
    .unwrap();
    catalog.insert_mascot_if_absent(&mascot).await.unwrap();
    mascot
}

async fn add_accessory(
    catalog: &MockCatalogRepository,
    name: &str,
    slot: AccessorySlot,
    price: i64,
) -> Accessory {
    let accessory = Accessory::new(
        name.to_string(),
        slot,
        format!("/static/{name}.png"),
        price,
    )
    .unwrap();
    catalog.insert_accessory_if_absent(&accessory).await.unwrap();
    accessory
}

struct CommunityFixture {
    users: Arc<MockUserRepository>,
    posts: Arc<MockPostRepository>,
    reactions: Arc<MockReactionRepository>,
    images: Arc<MockImageStore>,
}

fn community_fixture() -> CommunityFixture {
    CommunityFixture {
        users: Arc::new(MockUserRepository::new()),
        posts: Arc::new(MockPostRepository::new()),
        reactions: Arc::new(MockReactionRepository::new()),
        images: Arc::new(MockImageStore::new()),
    }
}

impl CommunityFixture {
    fn create_handler(&self) -> CreatePostCommandHandler {
        CreatePostCommandHandler::new(self.users.clone(), self.posts.clone(), self.images.clone())
    }

    fn update_handler(&self) -> UpdatePostCommandHandler {
        UpdatePostCommandHandler::new(
            self.users.clone(),
            self.posts.clone(),
            self.reactions.clone(),
            self.images.clone(),
        )
    }

    async fn create_post(&self, author: &User, image: Option<&str>) -> String {
        self.create_handler()
            .handle(CreatePostCommand {
                user_id: author.id().as_str().to_string(),
                title: "Day 1".to_string(),
                content: "Ran 5k this morning".to_string(),
                image: image.map(|name| ImageUpload {
                    filename: name.to_string(),
                    bytes: vec![0xFF, 0xD8, 0xFF],
                }),
            })
            .await
            .unwrap()
            .id
    }
}

// Check-in tests

#[tokio::test]
async fn test_first_check_in_pays_base_streak_and_daily_bonus() {
    let fx = check_in_fixture();
    let user = create_user(&fx.users, "first").await;
    let goal = create_goal(&fx.goals, &user, "Run").await;

    let result = fx.handler.handle(check(&user, &goal)).await.unwrap();

    assert_eq!(result.current_streak, 0);
    assert_eq!(result.total_streak, 1);
    assert_eq!(result.gained_cash, 400);
    assert_eq!(result.gained_exp, 20);
    assert_eq!(result.rewards.len(), 3);
    assert!(result.is_first_of_day);
    assert!(!result.is_level_up);

    let stored_user = fx.users.get(user.id()).await;
    assert_eq!(stored_user.cash(), 400);
    assert_eq!(stored_user.last_check_date(), Some(at(1, 8)));

    let stored_goal = fx.goals.get(goal.id()).await.unwrap();
    assert_eq!(stored_goal.last_verified_at(), Some(at(1, 8)));
    assert_eq!(fx.check_ins.count_by_user(user.id()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_second_check_same_day_is_rejected_without_changes() {
    let fx = check_in_fixture();
    let user = create_user(&fx.users, "twice").await;
    let goal = create_goal(&fx.goals, &user, "Read").await;

    fx.handler.handle(check(&user, &goal)).await.unwrap();

    fx.clock.set(at(1, 23));
    let result = fx.handler.handle(check(&user, &goal)).await;
    assert!(matches!(result, Err(DomainError::AlreadyCheckedIn(_))));

    assert_eq!(fx.users.get(user.id()).await.cash(), 400);
    assert_eq!(fx.check_ins.count_by_user(user.id()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_other_users_goal_is_not_found() {
    let fx = check_in_fixture();
    let owner = create_user(&fx.users, "owner").await;
    let intruder = create_user(&fx.users, "intruder").await;
    let goal = create_goal(&fx.goals, &owner, "Private").await;

    let result = fx.handler.handle(check(&intruder, &goal)).await;
    assert!(matches!(result, Err(DomainError::GoalNotFound(_))));
    assert_eq!(fx.users.get(intruder.id()).await.cash(), 0);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let fx = check_in_fixture();
    let owner = create_user(&fx.users, "ghost-owner").await;
    let goal = create_goal(&fx.goals, &owner, "Walk").await;

    let result = fx
        .handler
        .handle(CheckGoalCommand {
            user_id: UserId::new().as_str().to_string(),
            goal_id: goal.id().as_str().to_string(),
        })
        .await;
    assert!(matches!(result, Err(DomainError::UserNotFound(_))));
}

#[tokio::test]
async fn test_streaks_grow_on_consecutive_days() {
    let fx = check_in_fixture();
    let user = create_user(&fx.users, "daily").await;
    let goal = create_goal(&fx.goals, &user, "Stretch").await;

    fx.handler.handle(check(&user, &goal)).await.unwrap();

    fx.clock.set(at(2, 7));
    let day_two = fx.handler.handle(check(&user, &goal)).await.unwrap();
    assert_eq!(day_two.current_streak, 1);
    assert_eq!(day_two.total_streak, 2);
    // 100 base + 2 * 100 streak + 200 first-of-day
    assert_eq!(day_two.gained_cash, 500);
    assert_eq!(day_two.total_cash, 900);

    // Skipping a day resets both streaks
    fx.clock.set(at(4, 7));
    let day_four = fx.handler.handle(check(&user, &goal)).await.unwrap();
    assert_eq!(day_four.current_streak, 0);
    assert_eq!(day_four.total_streak, 1);
}

#[tokio::test]
async fn test_second_goal_same_day_gets_base_reward_only() {
    let fx = check_in_fixture();
    let user = create_user(&fx.users, "busy").await;
    let first = create_goal(&fx.goals, &user, "Run").await;
    let second = create_goal(&fx.goals, &user, "Read").await;

    fx.handler.handle(check(&user, &first)).await.unwrap();
    fx.clock.set(at(1, 9));
    let result = fx.handler.handle(check(&user, &second)).await.unwrap();

    assert!(!result.is_first_of_day);
    assert_eq!(result.gained_cash, 100);
    assert_eq!(result.rewards.len(), 1);
    assert_eq!(result.total_streak, 1);
    assert_eq!(fx.users.get(user.id()).await.cash(), 500);
}

#[tokio::test]
async fn test_check_in_crossing_exp_threshold_levels_up() {
    let fx = check_in_fixture();
    let user = User::restore(
        UserId::new(),
        "veteran".to_string(),
        None,
        SocialProvider::Google,
        "g-veteran".to_string(),
        0,
        None,
        1,
        90,
        0,
        Utc::now(),
    );
    fx.users.save(&user).await.unwrap();
    let goal = create_goal(&fx.goals, &user, "Meditate").await;

    let result = fx.handler.handle(check(&user, &goal)).await.unwrap();

    assert!(result.is_level_up);
    assert_eq!(result.current_level, 2);
    assert_eq!(result.current_exp, 10);

    let recent = fx.check_ins.find_recent(user.id(), 1).await.unwrap();
    assert!(recent[0].is_level_up());
}

// Goal tests

#[tokio::test]
async fn test_create_goal_requires_existing_user() {
    let users = Arc::new(MockUserRepository::new());
    let goals = Arc::new(MockGoalRepository::new());
    let handler = CreateGoalCommandHandler::new(users.clone(), goals.clone());

    let result = handler
        .handle(CreateGoalCommand {
            user_id: UserId::new().as_str().to_string(),
            title: "Run".to_string(),
            category: "health".to_string(),
            period: None,
            memo: None,
            due_date: None,
        })
        .await;
    assert!(matches!(result, Err(DomainError::UserNotFound(_))));

    let user = create_user(&users, "planner").await;
    let created = handler
        .handle(CreateGoalCommand {
            user_id: user.id().as_str().to_string(),
            title: "Run".to_string(),
            category: "health".to_string(),
            period: None,
            memo: Some("5k".to_string()),
            due_date: None,
        })
        .await
        .unwrap();

    assert_eq!(created.period, "daily");
    assert_eq!(created.memo.as_deref(), Some("5k"));
    assert_eq!(created.current_streak, 0);
}

#[tokio::test]
async fn test_update_goal_applies_partial_changes_and_clears_memo() {
    let users = Arc::new(MockUserRepository::new());
    let goals = Arc::new(MockGoalRepository::new());
    let user = create_user(&users, "editor").await;
    let mut goal = create_goal(&goals, &user, "Run").await;
    goal.update_memo(Some("morning".to_string()));
    goals.save(&goal).await.unwrap();

    let handler = UpdateGoalCommandHandler::new(goals.clone());
    let updated = handler
        .handle(UpdateGoalCommand {
            user_id: user.id().as_str().to_string(),
            goal_id: goal.id().as_str().to_string(),
            period: Some(GoalPeriod::Weekly),
            memo: Some(String::new()),
            is_completed: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.title, "Run");
    assert_eq!(updated.period, "weekly");
    assert!(updated.memo.is_none());
    assert!(updated.is_completed);
}

#[tokio::test]
async fn test_delete_goal_of_other_user_is_not_found() {
    let users = Arc::new(MockUserRepository::new());
    let goals = Arc::new(MockGoalRepository::new());
    let owner = create_user(&users, "keeper").await;
    let other = create_user(&users, "other").await;
    let goal = create_goal(&goals, &owner, "Journal").await;

    let handler = DeleteGoalCommandHandler::new(goals.clone());
    let result = handler
        .handle(DeleteGoalCommand {
            user_id: other.id().as_str().to_string(),
            goal_id: goal.id().as_str().to_string(),
        })
        .await;
    assert!(matches!(result, Err(DomainError::GoalNotFound(_))));
    assert!(goals.get(goal.id()).await.is_some());

    handler
        .handle(DeleteGoalCommand {
            user_id: owner.id().as_str().to_string(),
            goal_id: goal.id().as_str().to_string(),
        })
        .await
        .unwrap();
    assert!(goals.get(goal.id()).await.is_none());
}

// User tests

#[tokio::test]
async fn test_social_login_registers_once_and_grants_starter_kit() {
    let fx = shop_fixture();
    let kit = seed_builtin_catalog(fx.catalog.clone(), &BuiltinCatalog::embedded().unwrap())
        .await
        .unwrap();
    let handler = SocialLoginCommandHandler::new(
        fx.users.clone(),
        fx.catalog.clone(),
        fx.inventory.clone(),
        kit,
    );

    let first = handler
        .handle(SocialLoginCommand {
            profile: kakao_profile("kakao-42"),
        })
        .await
        .unwrap();
    assert!(first.is_new_user);
    assert_eq!(first.user.nickname, "user-kakao-42");
    assert_eq!(first.user.level, 1);

    let again = handler
        .handle(SocialLoginCommand {
            profile: kakao_profile("kakao-42"),
        })
        .await
        .unwrap();
    assert!(!again.is_new_user);
    assert_eq!(again.user.id, first.user.id);

    let user_id = UserId::from_string(&first.user.id);
    let mascots = fx.inventory.find_owned_mascots(&user_id).await.unwrap();
    assert_eq!(mascots.len(), 1);
    assert_eq!(mascots[0].mascot.name(), "Little Hippo");
    assert!(mascots[0].is_active);

    let accessories = fx.inventory.find_owned_accessories(&user_id).await.unwrap();
    assert_eq!(accessories.len(), 1);
    assert_eq!(accessories[0].accessory.name(), "Room");
    assert_eq!(accessories[0].accessory.slot(), AccessorySlot::Background);
    assert!(accessories[0].is_active);
}

#[tokio::test]
async fn test_social_login_survives_missing_starter_items() {
    let fx = shop_fixture();
    let handler = SocialLoginCommandHandler::new(
        fx.users.clone(),
        fx.catalog.clone(),
        fx.inventory.clone(),
        StarterKit {
            mascot_name: "Nobody".to_string(),
            background_name: "Nowhere".to_string(),
        },
    );

    let result = handler
        .handle(SocialLoginCommand {
            profile: kakao_profile("empty-shop"),
        })
        .await
        .unwrap();

    assert!(result.is_new_user);
    let user_id = UserId::from_string(&result.user.id);
    assert!(fx.inventory.find_owned_mascots(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_profile_rejects_blank_nickname_and_ignores_blank_email() {
    let users = Arc::new(MockUserRepository::new());
    let user = create_user(&users, "profile").await;
    let handler = UpdateProfileCommandHandler::new(users.clone());

    let blank = handler
        .handle(UpdateProfileCommand {
            user_id: user.id().as_str().to_string(),
            nickname: Some("   ".to_string()),
            email: None,
        })
        .await;
    assert!(matches!(blank, Err(DomainError::Validation(_))));

    let updated = handler
        .handle(UpdateProfileCommand {
            user_id: user.id().as_str().to_string(),
            nickname: Some("Runner".to_string()),
            email: Some("  ".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(updated.nickname, "Runner");
    assert!(updated.email.is_none());

    let updated = handler
        .handle(UpdateProfileCommand {
            user_id: user.id().as_str().to_string(),
            nickname: None,
            email: Some("runner@example.com".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(updated.nickname, "Runner");
    assert_eq!(updated.email.as_deref(), Some("runner@example.com"));
}

#[tokio::test]
async fn test_withdraw_removes_user() {
    let users = Arc::new(MockUserRepository::new());
    let user = create_user(&users, "leaving").await;
    let handler = WithdrawCommandHandler::new(users.clone());

    handler
        .handle(WithdrawCommand {
            user_id: user.id().as_str().to_string(),
        })
        .await
        .unwrap();
    assert!(users.find_by_id(user.id()).await.unwrap().is_none());

    let again = handler
        .handle(WithdrawCommand {
            user_id: user.id().as_str().to_string(),
        })
        .await;
    assert!(matches!(again, Err(DomainError::UserNotFound(_))));
}

// Shop tests

#[tokio::test]
async fn test_buy_accessory_charges_cash_then_rejects_repeat() {
    let fx = shop_fixture();
    let beanie = add_accessory(&fx.catalog, "Beanie", AccessorySlot::Head, 300).await;
    let user = user_with_cash(&fx.users, "buyer", 500).await;
    let handler =
        BuyAccessoryCommandHandler::new(fx.users.clone(), fx.catalog.clone(), fx.inventory.clone());

    let command = BuyAccessoryCommand {
        user_id: user.id().as_str().to_string(),
        accessory_id: beanie.id().as_str().to_string(),
    };

    let result = handler.handle(command.clone()).await.unwrap();
    assert_eq!(result.item_name, "Beanie");
    assert_eq!(result.price, 300);
    assert_eq!(result.remaining_cash, 200);
    assert_eq!(fx.users.get(user.id()).await.cash(), 200);

    let owned = fx
        .inventory
        .find_owned_accessory(user.id(), beanie.id())
        .await
        .unwrap()
        .unwrap();
    assert!(!owned.is_active);

    let repeat = handler.handle(command).await;
    assert!(matches!(repeat, Err(DomainError::AlreadyOwned(_))));
    assert_eq!(fx.users.get(user.id()).await.cash(), 200);
}

#[tokio::test]
async fn test_buy_mascot_with_insufficient_cash_changes_nothing() {
    let fx = shop_fixture();
    let turtle = add_mascot(&fx.catalog, "Turtle", 1000).await;
    let user = user_with_cash(&fx.users, "poor", 300).await;
    let handler =
        BuyMascotCommandHandler::new(fx.users.clone(), fx.catalog.clone(), fx.inventory.clone());

    let result = handler
        .handle(BuyMascotCommand {
            user_id: user.id().as_str().to_string(),
            mascot_id: turtle.id().as_str().to_string(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::InsufficientCash(_))));
    assert_eq!(fx.users.get(user.id()).await.cash(), 300);
    assert!(fx
        .inventory
        .find_owned_mascots(user.id())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_buy_unknown_item_is_not_found() {
    let fx = shop_fixture();
    let user = user_with_cash(&fx.users, "lost", 100).await;
    let handler =
        BuyMascotCommandHandler::new(fx.users.clone(), fx.catalog.clone(), fx.inventory.clone());

    let result = handler
        .handle(BuyMascotCommand {
            user_id: user.id().as_str().to_string(),
            mascot_id: MascotId::new().as_str().to_string(),
        })
        .await;
    assert!(matches!(result, Err(DomainError::ItemNotFound(_))));
}

#[tokio::test]
async fn test_equip_requires_ownership() {
    let fx = shop_fixture();
    let kitty = add_mascot(&fx.catalog, "Kitty", 0).await;
    let beanie = add_accessory(&fx.catalog, "Beanie", AccessorySlot::Head, 0).await;
    let user = create_user(&fx.users, "window-shopper").await;

    let mascot_result = EquipMascotCommandHandler::new(fx.inventory.clone())
        .handle(EquipMascotCommand {
            user_id: user.id().as_str().to_string(),
            mascot_id: kitty.id().as_str().to_string(),
        })
        .await;
    assert!(matches!(mascot_result, Err(DomainError::NotOwned(_))));

    let accessory_result = EquipAccessoryCommandHandler::new(fx.inventory.clone())
        .handle(EquipAccessoryCommand {
            user_id: user.id().as_str().to_string(),
            accessory_id: beanie.id().as_str().to_string(),
        })
        .await;
    assert!(matches!(accessory_result, Err(DomainError::NotOwned(_))));
}

#[tokio::test]
async fn test_equip_mascot_switches_active_one() {
    let fx = shop_fixture();
    let hippo = add_mascot(&fx.catalog, "Little Hippo", 0).await;
    let puppy = add_mascot(&fx.catalog, "Puppy", 0).await;
    let user = create_user(&fx.users, "collector").await;
    fx.inventory
        .grant_mascot(user.id(), hippo.id(), true)
        .await
        .unwrap();
    fx.inventory
        .grant_mascot(user.id(), puppy.id(), false)
        .await
        .unwrap();

    let result = EquipMascotCommandHandler::new(fx.inventory.clone())
        .handle(EquipMascotCommand {
            user_id: user.id().as_str().to_string(),
            mascot_id: puppy.id().as_str().to_string(),
        })
        .await
        .unwrap();
    assert!(result.is_active);
    assert_eq!(result.mascot.name, "Puppy");

    let active: Vec<String> = fx
        .inventory
        .find_owned_mascots(user.id())
        .await
        .unwrap()
        .into_iter()
        .filter(|m| m.is_active)
        .map(|m| m.mascot.name().to_string())
        .collect();
    assert_eq!(active, vec!["Puppy".to_string()]);
}

#[tokio::test]
async fn test_equip_accessory_replaces_only_same_slot() {
    let fx = shop_fixture();
    let room = add_accessory(&fx.catalog, "Room", AccessorySlot::Background, 0).await;
    let winter = add_accessory(&fx.catalog, "Winter", AccessorySlot::Background, 0).await;
    let beanie = add_accessory(&fx.catalog, "Beanie", AccessorySlot::Head, 0).await;
    let user = create_user(&fx.users, "dresser").await;
    for (item, equip) in [(&room, true), (&winter, false), (&beanie, true)] {
        fx.inventory
            .grant_accessory(user.id(), item.id(), item.slot(), equip)
            .await
            .unwrap();
    }

    let equip = EquipAccessoryCommandHandler::new(fx.inventory.clone());
    let result = equip
        .handle(EquipAccessoryCommand {
            user_id: user.id().as_str().to_string(),
            accessory_id: winter.id().as_str().to_string(),
        })
        .await
        .unwrap();
    assert!(result.is_active);

    let owned = fx.inventory.find_owned_accessories(user.id()).await.unwrap();
    let is_active = |name: &str| {
        owned
            .iter()
            .find(|a| a.accessory.name() == name)
            .map(|a| a.is_active)
            .unwrap()
    };
    assert!(!is_active("Room"));
    assert!(is_active("Winter"));
    assert!(is_active("Beanie"));

    let unequipped = UnequipAccessoryCommandHandler::new(fx.inventory.clone())
        .handle(UnequipAccessoryCommand {
            user_id: user.id().as_str().to_string(),
            accessory_id: beanie.id().as_str().to_string(),
        })
        .await
        .unwrap();
    assert!(!unequipped.is_active);
}

#[tokio::test]
async fn test_seeding_builtin_catalog_is_idempotent() {
    let catalog = Arc::new(MockCatalogRepository::new());
    let builtin = BuiltinCatalog::embedded().unwrap();

    let kit = seed_builtin_catalog(catalog.clone(), &builtin).await.unwrap();
    seed_builtin_catalog(catalog.clone(), &builtin).await.unwrap();

    assert_eq!(kit.mascot_name, "Little Hippo");
    assert_eq!(catalog.list_mascots().await.unwrap().len(), 4);
    assert_eq!(catalog.list_accessories().await.unwrap().len(), 9);
}

// Community tests

#[tokio::test]
async fn test_create_post_stores_image_and_author_nickname() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "writer").await;

    let dto = fx
        .create_handler()
        .handle(CreatePostCommand {
            user_id: author.id().as_str().to_string(),
            title: "Day 1".to_string(),
            content: "Ran 5k".to_string(),
            image: Some(ImageUpload {
                filename: "run.jpg".to_string(),
                bytes: vec![1, 2, 3],
            }),
        })
        .await
        .unwrap();

    assert_eq!(dto.author_nickname, "user-writer");
    assert_eq!(dto.image_url.as_deref(), Some("/static/0-run.jpg"));
    assert!(dto.reactions.is_empty());
    assert!(fx
        .posts
        .find_by_id(&PostId::from_string(&dto.id))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_create_post_discards_image_when_save_fails() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "unlucky").await;
    fx.posts.fail_saves.store(true, Ordering::SeqCst);

    let result = fx
        .create_handler()
        .handle(CreatePostCommand {
            user_id: author.id().as_str().to_string(),
            title: "Lost".to_string(),
            content: "Never saved".to_string(),
            image: Some(ImageUpload {
                filename: "lost.png".to_string(),
                bytes: vec![0],
            }),
        })
        .await;

    assert!(matches!(result, Err(DomainError::Repository(_))));
    assert_eq!(fx.images.removed().await, vec!["/static/0-lost.png".to_string()]);
}

#[tokio::test]
async fn test_create_post_validates_before_storing_image() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "hasty").await;

    let result = fx
        .create_handler()
        .handle(CreatePostCommand {
            user_id: author.id().as_str().to_string(),
            title: "  ".to_string(),
            content: "No title".to_string(),
            image: Some(ImageUpload {
                filename: "x.png".to_string(),
                bytes: vec![0],
            }),
        })
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(fx.images.stored.read().await.is_empty());
}

#[tokio::test]
async fn test_only_author_can_update_or_delete_post() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "author").await;
    let stranger = create_user(&fx.users, "stranger").await;
    let post_id = fx.create_post(&author, None).await;

    let update = fx
        .update_handler()
        .handle(UpdatePostCommand {
            user_id: stranger.id().as_str().to_string(),
            post_id: post_id.clone(),
            title: Some("Hijacked".to_string()),
            content: None,
            image: None,
        })
        .await;
    assert!(matches!(update, Err(DomainError::Forbidden(_))));

    let delete = DeletePostCommandHandler::new(fx.posts.clone(), fx.images.clone())
        .handle(DeletePostCommand {
            user_id: stranger.id().as_str().to_string(),
            post_id: post_id.clone(),
        })
        .await;
    assert!(matches!(delete, Err(DomainError::Forbidden(_))));

    let stored = fx
        .posts
        .find_by_id(&PostId::from_string(&post_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title(), "Day 1");
}

#[tokio::test]
async fn test_update_post_replaces_image_and_removes_old_file() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "photographer").await;
    let post_id = fx.create_post(&author, Some("before.png")).await;

    let dto = fx
        .update_handler()
        .handle(UpdatePostCommand {
            user_id: author.id().as_str().to_string(),
            post_id: post_id.clone(),
            title: None,
            content: Some("Updated body".to_string()),
            image: Some(ImageUpload {
                filename: "after.png".to_string(),
                bytes: vec![9],
            }),
        })
        .await
        .unwrap();

    assert_eq!(dto.title, "Day 1");
    assert_eq!(dto.content, "Updated body");
    assert_eq!(dto.image_url.as_deref(), Some("/static/1-after.png"));
    assert_eq!(fx.images.removed().await, vec!["/static/0-before.png".to_string()]);
}

#[tokio::test]
async fn test_update_post_keeps_image_when_store_returns_same_url() {
    let fx = community_fixture();
    fx.images.reuse_names.store(true, Ordering::SeqCst);
    let author = create_user(&fx.users, "repeat_uploader").await;
    let post_id = fx.create_post(&author, Some("photo.png")).await;

    let dto = fx
        .update_handler()
        .handle(UpdatePostCommand {
            user_id: author.id().as_str().to_string(),
            post_id,
            title: None,
            content: None,
            image: Some(ImageUpload {
                filename: "photo.png".to_string(),
                bytes: vec![1, 2, 3],
            }),
        })
        .await
        .unwrap();

    assert_eq!(dto.image_url.as_deref(), Some("/static/photo.png"));
    assert!(fx.images.removed().await.is_empty());
}

#[tokio::test]
async fn test_delete_post_removes_its_image() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "cleaner").await;
    let post_id = fx.create_post(&author, Some("gone.png")).await;

    DeletePostCommandHandler::new(fx.posts.clone(), fx.images.clone())
        .handle(DeletePostCommand {
            user_id: author.id().as_str().to_string(),
            post_id: post_id.clone(),
        })
        .await
        .unwrap();

    assert!(fx
        .posts
        .find_by_id(&PostId::from_string(&post_id))
        .await
        .unwrap()
        .is_none());
    assert_eq!(fx.images.removed().await, vec!["/static/0-gone.png".to_string()]);
}

#[tokio::test]
async fn test_reaction_toggle_sequence() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "poster").await;
    let fan = create_user(&fx.users, "fan").await;
    let post_id = fx.create_post(&author, None).await;
    let handler = ReactToPostCommandHandler::new(fx.posts.clone(), fx.reactions.clone());

    let react = |emoji: &str| ReactToPostCommand {
        user_id: fan.id().as_str().to_string(),
        post_id: post_id.clone(),
        emoji: emoji.to_string(),
    };

    let created = handler.handle(react("👍")).await.unwrap();
    assert_eq!(created.action, ReactionAction::Created);
    assert_eq!(created.emoji.as_deref(), Some("👍"));

    let updated = handler.handle(react("🔥")).await.unwrap();
    assert_eq!(updated.action, ReactionAction::Updated);

    let post = PostId::from_string(&post_id);
    let stored = fx.reactions.find_by_post(&post).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].emoji, "🔥");

    let deleted = handler.handle(react("🔥")).await.unwrap();
    assert_eq!(deleted.action, ReactionAction::Deleted);
    assert!(deleted.emoji.is_none());
    assert!(fx.reactions.find_by_post(&post).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reaction_rejects_empty_emoji_and_missing_post() {
    let fx = community_fixture();
    let author = create_user(&fx.users, "quiet").await;
    let post_id = fx.create_post(&author, None).await;
    let handler = ReactToPostCommandHandler::new(fx.posts.clone(), fx.reactions.clone());

    let empty = handler
        .handle(ReactToPostCommand {
            user_id: author.id().as_str().to_string(),
            post_id,
            emoji: "  ".to_string(),
        })
        .await;
    assert!(matches!(empty, Err(DomainError::Validation(_))));

    let missing = handler
        .handle(ReactToPostCommand {
            user_id: author.id().as_str().to_string(),
            post_id: PostId::new().as_str().to_string(),
            emoji: "👍".to_string(),
        })
        .await;
    assert!(matches!(missing, Err(DomainError::PostNotFound(_))));
}
