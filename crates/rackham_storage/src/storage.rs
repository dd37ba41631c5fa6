//! Storage trait definition.

use rackham_error::RackhamResult;

/// Trait for pluggable text storage backends.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Read a text file.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`.
    async fn read_text(&self, path: &str) -> RackhamResult<Option<String>>;

    /// Write a text file, creating parent folders as needed.
    async fn write_text(&self, path: &str, content: &str) -> RackhamResult<()>;

    /// Create a folder and any missing parents.
    async fn create_folder(&self, path: &str) -> RackhamResult<()>;

    /// Check whether a file or folder exists.
    async fn exists(&self, path: &str) -> RackhamResult<bool>;
}
