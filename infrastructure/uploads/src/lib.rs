use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use business::domain::product::errors::ProductError;
use business::domain::product::services::{ImageStorage, ImageUpload};

/// Stores uploaded product images as plain files served under a public prefix.
pub struct DiskImageStorage {
    directory: PathBuf,
    public_prefix: String,
}

impl DiskImageStorage {
    pub fn new(directory: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_name_for(&self, reference: &str) -> Option<String> {
        let name = reference
            .strip_prefix(&self.public_prefix)?
            .strip_prefix('/')?;
        (!name.is_empty() && sanitize_file_name(name) == name).then(|| name.to_string())
    }
}

/// Reduces a client-supplied name to a safe flat file name.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

#[async_trait]
impl ImageStorage for DiskImageStorage {
    async fn store(&self, image: ImageUpload) -> Result<String, ProductError> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, dir = %self.directory.display(), "cannot create upload directory");
                ProductError::ImageStorageFailed
            })?;

        let mut suffix = Uuid::new_v4().simple().to_string();
        suffix.truncate(8);
        let name = format!(
            "{}-{}-{}",
            Utc::now().timestamp_millis(),
            suffix,
            sanitize_file_name(&image.file_name)
        );
        let path = self.directory.join(&name);

        let write = async {
            let mut file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await?;
            file.write_all(&image.bytes).await?;
            file.flush().await?;
            Ok::<_, std::io::Error>(())
        };
        write.await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "cannot write uploaded image");
            ProductError::ImageStorageFailed
        })?;

        tracing::debug!(path = %path.display(), bytes = image.bytes.len(), "stored uploaded image");
        Ok(format!("{}/{}", self.public_prefix, name))
    }

    async fn remove(&self, reference: &str) -> Result<(), ProductError> {
        let Some(name) = self.file_name_for(reference) else {
            return Ok(());
        };
        match tokio::fs::remove_file(self.directory.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, reference, "cannot remove uploaded image");
                Err(ProductError::ImageStorageFailed)
            }
        }
    }
}
