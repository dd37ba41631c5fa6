//! Local filesystem storage backend.

use crate::ContentStore;
use rackham_error::{RackhamResult, StorageError, StorageErrorKind};
use std::path::{Component, Path, PathBuf};

/// Stores content under a root directory.
///
/// Logical paths may not be absolute or contain `..`, so nothing outside the
/// root can be read or written.
///
/// ```text
/// root/
/// ├── (in)/
/// │   ├── story_input.txt
/// │   └── ai_queries/
/// └── (out)/
///     └── the-lost-kite-20250101-120000/
///         └── 1-Story.txt
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(root))]
    pub fn new(root: impl Into<PathBuf>) -> RackhamResult<Self> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                root.display(),
                e
            )))
        })?;

        tracing::info!(path = %root.display(), "Opened filesystem store");
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a logical path onto the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidPath`] for empty, absolute or
    /// parent-relative paths.
    pub fn resolve(&self, path: &str) -> RackhamResult<PathBuf> {
        let relative = Path::new(path);
        if path.trim().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath("empty path".to_string())).into());
        }

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StorageError::new(StorageErrorKind::InvalidPath(path.to_string())).into());
                }
            }
        }
        Ok(resolved)
    }
}

#[async_trait::async_trait]
impl ContentStore for FileSystemStore {
    #[tracing::instrument(skip(self))]
    async fn read_text(&self, path: &str) -> RackhamResult<Option<String>> {
        let full = self.resolve(path)?;

        match tokio::fs::read_to_string(&full).await {
            Ok(content) => {
                tracing::debug!(bytes = content.len(), "Read text file");
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Text file not found");
                Ok(None)
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                full.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, content), fields(bytes = content.len()))]
    async fn write_text(&self, path: &str, content: &str) -> RackhamResult<()> {
        let full = self.resolve(path)?;

        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = full.with_extension("tmp");
        tokio::fs::write(&temp_path, content).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &full).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                full.display(),
                e
            )))
        })?;

        tracing::info!(path = %full.display(), "Wrote text file");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn create_folder(&self, path: &str) -> RackhamResult<()> {
        let full = self.resolve(path)?;
        tokio::fs::create_dir_all(&full).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                full.display(),
                e
            )))
        })?;
        tracing::debug!(path = %full.display(), "Created folder");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, path: &str) -> RackhamResult<bool> {
        let full = self.resolve(path)?;
        tokio::fs::try_exists(&full).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                full.display(),
                e
            )))
            .into()
        })
    }
}
