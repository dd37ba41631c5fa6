//! Tests for the filesystem content store.

use rackham_error::{RackhamErrorKind, StorageErrorKind};
use rackham_storage::{ContentStore, FileSystemStore};
use tempfile::TempDir;

#[tokio::test]
async fn write_then_read_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(dir.path()).unwrap();

    store
        .write_text("(out)/run-1/1-Story.txt", "Once upon a time")
        .await
        .unwrap();

    assert!(store.exists("(out)/run-1").await.unwrap());
    let content = store.read_text("(out)/run-1/1-Story.txt").await.unwrap();
    assert_eq!(content.as_deref(), Some("Once upon a time"));
    assert!(!dir.path().join("(out)/run-1/1-Story.tmp").exists());
}

#[tokio::test]
async fn missing_file_reads_as_none() {
    let dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(dir.path()).unwrap();

    assert_eq!(store.read_text("(in)/story_input.txt").await.unwrap(), None);
    assert!(!store.exists("(in)/story_input.txt").await.unwrap());
}

#[tokio::test]
async fn create_folder_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(dir.path()).unwrap();

    store.create_folder("(out)/a/b").await.unwrap();
    store.create_folder("(out)/a/b").await.unwrap();
    assert!(dir.path().join("(out)/a/b").is_dir());
}

#[tokio::test]
async fn overwrite_replaces_content() {
    let dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(dir.path()).unwrap();

    store.write_text("notes.txt", "first").await.unwrap();
    store.write_text("notes.txt", "second").await.unwrap();
    assert_eq!(
        store.read_text("notes.txt").await.unwrap().as_deref(),
        Some("second")
    );
}

#[tokio::test]
async fn paths_cannot_escape_root() {
    let dir = TempDir::new().unwrap();
    let store = FileSystemStore::new(dir.path().join("root")).unwrap();

    for bad in ["../outside.txt", "/etc/passwd", "(in)/../../x", ""] {
        let err = store.read_text(bad).await.unwrap_err();
        match err.kind() {
            RackhamErrorKind::Storage(e) => {
                assert!(matches!(e.kind, StorageErrorKind::InvalidPath(_)), "{bad}")
            }
            other => panic!("unexpected error for {bad}: {other}"),
        }
    }
}

#[test]
fn new_creates_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested/store");
    let store = FileSystemStore::new(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}
