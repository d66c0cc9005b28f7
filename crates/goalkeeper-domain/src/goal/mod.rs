mod aggregate;
mod repository;
mod value_objects;

pub use aggregate::Goal;
pub use repository::GoalRepository;
pub use value_objects::GoalPeriod;
