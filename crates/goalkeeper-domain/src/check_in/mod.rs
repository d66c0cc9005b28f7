mod domain_service;
mod record;
mod repository;
mod value_objects;

pub use domain_service::CheckInDomainService;
pub use record::{CheckInDaySummary, CheckInRecord};
pub use repository::CheckInRepository;
pub use value_objects::{CheckInOutcome, RewardItem, RewardKind, RewardPolicy};
