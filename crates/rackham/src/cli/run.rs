//! Story run command handler.

use rackham::{ProcessingMethod, RackhamResult, RunOptions, run_story};
use std::path::PathBuf;

/// Run the pipeline and print a summary to stdout.
pub async fn run_command(
    root: PathBuf,
    config: Option<PathBuf>,
    offline: bool,
) -> RackhamResult<()> {
    let mut options = RunOptions::new(root).with_offline(offline);
    if let Some(path) = config {
        options = options.with_config(path);
    }

    let summary = run_story(&options).await?;

    println!("Story: {}", summary.title());
    println!(
        "Processed in {:.2} seconds ({})",
        summary.elapsed().as_secs_f64(),
        summary.method()
    );
    if *summary.method() != ProcessingMethod::Model {
        println!("Some stages used offline fallbacks; see processing-report.txt");
    }
    println!("Output folder: {}", summary.folder());
    for file in summary.files() {
        println!("  {file}");
    }
    Ok(())
}
