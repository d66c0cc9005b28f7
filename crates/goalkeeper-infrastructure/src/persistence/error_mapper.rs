use goalkeeper_domain::shared::DomainError;
use tracing::warn;

/// Converts storage errors into domain errors, tagged with the operation
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(error: sqlx::Error, context: &str) -> DomainError {
        match &error {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation() || db_err.is_foreign_key_violation() =>
            {
                warn!(context = context, error = %db_err, "Constraint violation");
                DomainError::DataIntegrity(format!("{}: {}", context, db_err))
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DomainError::DataIntegrity(format!("{}: {}", context, error))
            }
            _ => DomainError::Repository(format!("{}: {}", context, error)),
        }
    }

    pub fn map_json_error(error: serde_json::Error, context: &str) -> DomainError {
        DomainError::Serialization(format!("{}: {}", context, error))
    }

    /// Narrow a stored integer into the domain's unsigned type
    pub fn to_u32(value: i64, field: &str) -> Result<u32, DomainError> {
        u32::try_from(value).map_err(|_| {
            DomainError::DataIntegrity(format!("Stored {} out of range: {}", field, value))
        })
    }
}
