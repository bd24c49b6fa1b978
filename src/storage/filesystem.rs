use super::BlobStorage;
use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

/// Filesystem-backed blob storage. Filenames are generated, never taken
/// from the client.
pub struct FilesystemStorage {
    root: PathBuf,
    public_base: String,
}

impl FilesystemStorage {
    pub fn new(root: PathBuf, public_base: String) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, public_base })
    }
}

#[async_trait]
impl BlobStorage for FilesystemStorage {
    async fn store(&self, bytes: &[u8], extension: &str) -> Result<(String, String), String> {
        let filename = format!(
            "{}-{}.{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );
        let path = self.root.join(&filename);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| format!("failed to write {}: {}", path.display(), e))?;

        let url = format!("{}/{}", self.public_base.trim_end_matches('/'), filename);
        Ok((url, filename))
    }
}
