use async_trait::async_trait;

use crate::shared::DomainError;

/// Storage for post images
///
/// `store` returns the public URL recorded on the post; `remove` takes that
/// same URL back.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, original_filename: &str, bytes: &[u8]) -> Result<String, DomainError>;
    async fn remove(&self, public_url: &str) -> Result<(), DomainError>;
}
