use goalkeeper_domain::shared::DomainError;

use super::RepositoryErrorMapper;

/// Extension trait for sqlx results inside repositories
pub trait ResultExt<T> {
    /// Usage: `tx.commit().await.map_repo_error("Commit check-in")?`
    fn map_repo_error(self, context: &str) -> Result<T, DomainError>;
}

impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn map_repo_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| RepositoryErrorMapper::map_sqlx_error(e, context))
    }
}
