// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod check_in;
pub mod community;
pub mod goal;
pub mod shared;
pub mod shop;
pub mod user;

// Re-exports for convenience
pub use shared::{DomainError, GoalId, UserId};
