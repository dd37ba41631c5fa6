//! Input check command handler.

use rackham::{FileSystemStore, RackhamResult, check_inputs, load_config};
use rackham_error::{PipelineError, PipelineErrorKind};
use std::path::PathBuf;

/// List each expected input and fail if any is missing.
pub async fn check_layout(root: PathBuf, config: Option<PathBuf>) -> RackhamResult<()> {
    let config = load_config(config.as_deref())?;
    let store = FileSystemStore::new(root)?;
    let statuses = check_inputs(&store, &config.layout).await?;

    for status in &statuses {
        let mark = if *status.present() { "ok" } else { "MISSING" };
        println!("{mark:>8}  {:<20} {}", status.key().to_string(), status.path());
    }

    let missing: Vec<String> = statuses
        .iter()
        .filter(|s| !s.present())
        .map(|s| format!("{} ({})", s.key(), s.path()))
        .collect();
    if missing.is_empty() {
        println!("All {} inputs present", statuses.len());
        Ok(())
    } else {
        Err(PipelineError::new(PipelineErrorKind::MissingInput(missing.join(", ")))
            .into())
    }
}
