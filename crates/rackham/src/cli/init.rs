//! Folder skeleton command handler.

use rackham::{FileSystemStore, RackhamResult, init_layout, load_config};
use std::path::PathBuf;

/// Create any missing input and output folders, then list the inputs to add.
pub async fn init_root(root: PathBuf, config: Option<PathBuf>) -> RackhamResult<()> {
    let config = load_config(config.as_deref())?;
    let store = FileSystemStore::new(root)?;
    let created = init_layout(&store, &config.layout).await?;

    if created.is_empty() {
        println!("Folder layout already present");
    }
    for folder in &created {
        println!("Created {folder}");
    }
    println!("Add these inputs before running:");
    for (_, path) in config.layout.inputs() {
        println!("  {path}");
    }
    Ok(())
}
