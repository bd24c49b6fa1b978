//! Blob storage for uploaded image assets.

mod filesystem;

pub use filesystem::FilesystemStorage;

use async_trait::async_trait;

/// Where uploaded images land. Implementations return a public URL for the
/// stored file; the layout compiler treats that URL as opaque.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store one file and return `(public_url, stored_filename)`.
    async fn store(&self, bytes: &[u8], extension: &str) -> Result<(String, String), String>;
}
