//! In-memory content store.

use async_trait::async_trait;
use rackham_error::{RackhamResult, StorageError, StorageErrorKind};
use rackham_storage::ContentStore;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Store backed by a shared map. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Store pre-populated with `files`.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (String, &'a str)>) -> Self {
        let store = Self::default();
        store
            .files
            .lock()
            .unwrap()
            .extend(files.into_iter().map(|(path, text)| (path, text.to_string())));
        store
    }

    /// Remove a file.
    #[allow(dead_code)]
    pub fn remove(&self, path: &str) {
        self.files.lock().unwrap().remove(path);
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn read_text(&self, path: &str) -> RackhamResult<Option<String>> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    async fn write_text(&self, path: &str, content: &str) -> RackhamResult<()> {
        if path.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath("empty".to_string())).into());
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }

    async fn create_folder(&self, _path: &str) -> RackhamResult<()> {
        Ok(())
    }

    async fn exists(&self, path: &str) -> RackhamResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }
}
