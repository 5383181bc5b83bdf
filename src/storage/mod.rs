//! Blob storage boundary
//!
//! Uploaded vehicle photos and rendered report documents are opaque
//! blobs. The store hands back a reference string that is persisted on
//! the owning row and can be turned into a public URL for display.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use uuid::Uuid;

/// Boundary trait so services can be tested without touching disk.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist a blob, returning its reference
    async fn store(&self, bytes: &[u8], content_type: &str) -> Result<String>;
    /// Public URL a stored blob is served from
    fn url_for(&self, blob_ref: &str) -> String;
}

/// Filesystem-backed blob store. Blob references are
/// `<uuid>.<extension>` filenames under the configured root.
#[derive(Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, bytes: &[u8], content_type: &str) -> Result<String> {
        let blob_ref = format!("{}.{}", Uuid::new_v4(), extension_for(content_type));

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("failed to create blob root: {}", e)))?;

        let path = self.root.join(&blob_ref);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("failed to write blob: {}", e)))?;

        Ok(blob_ref)
    }

    fn url_for(&self, blob_ref: &str) -> String {
        format!("{}/blobs/{}", self.public_base_url, blob_ref)
    }
}
