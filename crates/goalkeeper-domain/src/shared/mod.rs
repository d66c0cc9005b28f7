use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod calendar;
pub mod clock;

pub use calendar::DayBoundary;
pub use clock::{Clock, SystemClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(GoalId);
define_id!(CheckInId);
define_id!(MascotId);
define_id!(AccessoryId);
define_id!(PostId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization (1xxx)
    Forbidden = 1002,

    // Resource Not Found (2xxx)
    UserNotFound = 2001,
    GoalNotFound = 2002,
    PostNotFound = 2003,
    ItemNotFound = 2004,

    // Business Logic (3xxx)
    AlreadyCheckedInToday = 3001,
    AlreadyOwned = 3002,
    InsufficientCash = 3003,
    ItemNotOwned = 3004,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DataIntegrityError = 4003,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::UserNotFound
            | ErrorCode::GoalNotFound
            | ErrorCode::PostNotFound
            | ErrorCode::ItemNotFound
            | ErrorCode::AlreadyCheckedInToday
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::Forbidden
            | ErrorCode::AlreadyOwned
            | ErrorCode::InsufficientCash
            | ErrorCode::ItemNotOwned => ErrorSeverity::Warning,

            ErrorCode::RepositoryError
            | ErrorCode::DataIntegrityError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Coarse failure category a transport maps onto its own status codes
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::UserNotFound
            | ErrorCode::GoalNotFound
            | ErrorCode::PostNotFound
            | ErrorCode::ItemNotFound => ErrorKind::NotFound,

            ErrorCode::AlreadyCheckedInToday
            | ErrorCode::AlreadyOwned
            | ErrorCode::InsufficientCash => ErrorKind::Conflict,

            ErrorCode::Forbidden => ErrorKind::Forbidden,

            ErrorCode::ItemNotOwned
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorKind::Invalid,

            ErrorCode::RepositoryError
            | ErrorCode::DataIntegrityError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorKind::Internal,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Invalid,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Already checked in today: {0}")]
    AlreadyCheckedIn(String),

    #[error("Already owned: {0}")]
    AlreadyOwned(String),

    #[error("Insufficient cash: {0}")]
    InsufficientCash(String),

    #[error("Item not owned: {0}")]
    NotOwned(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::UserNotFound(_) => ErrorCode::UserNotFound,
            DomainError::GoalNotFound(_) => ErrorCode::GoalNotFound,
            DomainError::PostNotFound(_) => ErrorCode::PostNotFound,
            DomainError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            DomainError::AlreadyCheckedIn(_) => ErrorCode::AlreadyCheckedInToday,
            DomainError::AlreadyOwned(_) => ErrorCode::AlreadyOwned,
            DomainError::InsufficientCash(_) => ErrorCode::InsufficientCash,
            DomainError::NotOwned(_) => ErrorCode::ItemNotOwned,
            DomainError::Forbidden(_) => ErrorCode::Forbidden,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
            DomainError::Repository(_) => ErrorCode::RepositoryError,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Serialization(_) => ErrorCode::SerializationError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::UserNotFound(msg)
            | DomainError::GoalNotFound(msg)
            | DomainError::PostNotFound(msg)
            | DomainError::ItemNotFound(msg)
            | DomainError::AlreadyCheckedIn(msg)
            | DomainError::AlreadyOwned(msg)
            | DomainError::InsufficientCash(msg)
            | DomainError::NotOwned(msg)
            | DomainError::Forbidden(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Repository(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Serialization(msg)
            | DomainError::Deserialization(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
