use goalkeeper_domain::shared::{DomainError, ErrorCode, ErrorKind, ErrorSeverity};
use serde::{Deserialize, Serialize};

/// Structured error returned by every CLI command
///
/// Carries enough for a caller to react without parsing the message:
/// - numeric code (1xxx-6xxx range)
/// - human-readable message
/// - severity for presentation
/// - coarse kind a transport maps onto its own status codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: u16,
    pub message: String,
    pub severity: ErrorSeverity,
    pub kind: ErrorKind,
}

impl CommandError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            kind: error_code.kind(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationError, message)
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.message().to_string(),
            severity: err.severity(),
            kind: err.kind(),
        }
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self::infrastructure(message)
    }
}

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        Self::infrastructure(message.to_string())
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::infrastructure(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_code(ErrorCode::SerializationError, err.to_string())
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_from_domain_error() {
        let domain_err = DomainError::AlreadyCheckedIn("goal-1".to_string());
        let cmd_err: CommandError = domain_err.into();

        assert_eq!(cmd_err.code, 3001);
        assert_eq!(cmd_err.message, "goal-1");
        assert_eq!(cmd_err.severity, ErrorSeverity::Info);
        assert_eq!(cmd_err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_not_owned_is_invalid_request() {
        let cmd_err: CommandError = DomainError::NotOwned("mascot m-1".to_string()).into();

        assert_eq!(cmd_err.code, 3004);
        assert_eq!(cmd_err.kind, ErrorKind::Invalid);
    }

    #[test]
    fn test_command_error_from_string() {
        let cmd_err: CommandError = "Something went wrong".into();

        assert_eq!(cmd_err.code, 5001);
        assert_eq!(cmd_err.kind, ErrorKind::Internal);
        assert_eq!(cmd_err.to_string(), "[5001] Something went wrong");
    }

    #[test]
    fn test_serializes_kind_in_snake_case() {
        let cmd_err: CommandError = DomainError::GoalNotFound("g".to_string()).into();
        let json = serde_json::to_value(&cmd_err).unwrap();

        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["code"], 2002);
    }
}
