use async_trait::async_trait;
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use goalkeeper_domain::community::ImageStore;
use goalkeeper_domain::shared::DomainError;

const MAX_NAME_ATTEMPTS: u32 = 100;

/// Writes post images into a directory served under a public URL prefix
pub struct LocalImageStore {
    upload_dir: PathBuf,
    url_prefix: String,
}

impl LocalImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Last path component only, so a client-supplied name cannot escape the upload dir
    fn sanitize(filename: &str) -> Result<String, DomainError> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::trim)
            .unwrap_or_default();

        if name.is_empty() || name == ".." {
            return Err(DomainError::InvalidInput(format!(
                "Invalid image filename: {filename:?}"
            )));
        }
        Ok(name.to_string())
    }

    fn stored_path(&self, public_url: &str) -> Result<PathBuf, DomainError> {
        let relative = public_url
            .strip_prefix(&self.url_prefix)
            .map(|rest| rest.trim_start_matches('/'))
            .ok_or_else(|| {
                DomainError::InvalidInput(format!("Not a stored image URL: {public_url}"))
            })?;

        Ok(self.upload_dir.join(Self::sanitize(relative)?))
    }

    /// `<timestamp>_<name>`, then `<timestamp>-<n>_<name>` once that is taken
    fn candidate_name(timestamp: &str, name: &str, attempt: u32) -> String {
        if attempt == 0 {
            format!("{timestamp}_{name}")
        } else {
            format!("{timestamp}-{attempt}_{name}")
        }
    }

    /// Creates a file that did not exist before, so an earlier upload is never overwritten
    async fn create_unique(&self, name: &str) -> Result<(String, tokio::fs::File), DomainError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let stored_name = Self::candidate_name(&timestamp, name, attempt);
            let path = self.upload_dir.join(&stored_name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((stored_name, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "Image name taken, retrying");
                }
                Err(e) => {
                    return Err(DomainError::Infrastructure(format!(
                        "Failed to create image {}: {e}",
                        path.display()
                    )))
                }
            }
        }

        Err(DomainError::Infrastructure(format!(
            "No free image name for {name} after {MAX_NAME_ATTEMPTS} attempts"
        )))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, original_filename: &str, bytes: &[u8]) -> Result<String, DomainError> {
        let name = Self::sanitize(original_filename)?;

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                DomainError::Infrastructure(format!("Failed to create upload directory: {e}"))
            })?;

        let (stored_name, mut file) = self.create_unique(&name).await?;
        let path = self.upload_dir.join(&stored_name);

        let written = match file.write_all(bytes).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&path).await;
            return Err(DomainError::Infrastructure(format!(
                "Failed to write image {}: {e}",
                path.display()
            )));
        }

        info!(path = %path.display(), size = bytes.len(), "Image stored");
        Ok(format!("{}/{}", self.url_prefix, stored_name))
    }

    async fn remove(&self, public_url: &str) -> Result<(), DomainError> {
        let path = self.stored_path(public_url)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Image removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Infrastructure(format!(
                "Failed to remove image {}: {e}",
                path.display()
            ))),
        }
    }
}
