//! Local-disk implementation of AvatarStore

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use cafe_core::error::DomainError;
use cafe_core::traits::{AvatarStore, RepoResult};

/// Stores avatars as plain files in one directory
#[derive(Debug, Clone)]
pub struct DiskAvatarStore {
    root: PathBuf,
}

impl DiskAvatarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if missing
    pub async fn ensure_root(&self) -> RepoResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| storage_error(&self.root, &e))
    }

    // Only the final path component is used, so stored names cannot escape the root
    fn path_for(&self, file_name: &str) -> RepoResult<PathBuf> {
        Path::new(file_name)
            .file_name()
            .map(|name| self.root.join(name))
            .ok_or_else(|| DomainError::StorageError(format!("invalid file name: {file_name}")))
    }
}

fn storage_error(path: &Path, e: &std::io::Error) -> DomainError {
    DomainError::StorageError(format!("{}: {e}", path.display()))
}

#[async_trait]
impl AvatarStore for DiskAvatarStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn save(&self, file_name: &str, bytes: &[u8]) -> RepoResult<()> {
        self.ensure_root().await?;
        let path = self.path_for(file_name)?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| storage_error(&path, &e))?;
        debug!(path = %path.display(), "Avatar written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, file_name: &str) -> RepoResult<()> {
        let path = self.path_for(file_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&path, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "cafe-avatars-{tag}-{}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[tokio::test]
    async fn test_save_and_remove() {
        let store = DiskAvatarStore::new(temp_root("save"));
        store.save("avatar-1.png", b"png-bytes").await.unwrap();

        let written = tokio::fs::read(store.root().join("avatar-1.png")).await.unwrap();
        assert_eq!(written, b"png-bytes");

        store.remove("avatar-1.png").await.unwrap();
        assert!(!store.root().join("avatar-1.png").exists());

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let store = DiskAvatarStore::new(temp_root("missing"));
        store.remove("nothing-here.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_directory_components_are_stripped() {
        let store = DiskAvatarStore::new(temp_root("strip"));
        store.save("../../escape.png", b"x").await.unwrap();
        assert!(store.root().join("escape.png").exists());

        tokio::fs::remove_dir_all(store.root()).await.unwrap();
    }
}
