mod check_in_streak_queries;
mod community_queries;
mod goal_queries;
mod shop_queries;
mod user_queries;

pub use check_in_streak_queries::CheckInStreakQueries;
pub use community_queries::{CommunityQueryService, DEFAULT_PAGE_SIZE};
pub use goal_queries::GoalQueryService;
pub use shop_queries::ShopQueryService;
pub use user_queries::UserQueryService;
