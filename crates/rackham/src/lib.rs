//! Rackham turns a plain-text children's story into a storybook framework.
//!
//! A run reads the story and a set of instruction texts, asks a chat model
//! for characters, scenes, narration and image prompts in turn, and writes
//! six text artifacts into a timestamped output folder. Every stage has an
//! offline fallback, so a run completes even with no model reachable.
//!
//! # Quick start
//!
//! ```no_run
//! use rackham::{RunOptions, run_story};
//!
//! # async fn example() -> rackham::RackhamResult<()> {
//! let summary = run_story(&RunOptions::new(".")).await?;
//! println!("Wrote {} files to {}", summary.files().len(), summary.folder());
//! # Ok(())
//! # }
//! ```
//!
//! # Crates
//!
//! - `rackham_error` - error kinds and the crate-wide result type
//! - `rackham_core` - story, character, scene and prompt entities
//! - `rackham_config` - layered configuration
//! - `rackham_interface` - the model driver trait
//! - `rackham_models` - retrying model client and the OpenAI-compatible driver
//! - `rackham_storage` - content storage
//! - `rackham_pipeline` - the four-stage pipeline
//! - `rackham_render` - artifact rendering

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
pub mod observability;
mod output;

pub use app::{
    InputStatus, RunOptions, RunSummary, check_inputs, connect_client, init_layout, load_config,
    run_story,
};
pub use output::{output_folder_name, write_outputs};

pub use rackham_config::{InputKey, LayoutConfig, ModelConfig, OutputNames, RackhamConfig, RetryConfig};
pub use rackham_core::{
    Character, ImagePrompt, ProcessingMethod, ProcessingResult, ProcessingStats, Scene, Stage,
    StageReport, Story,
};
pub use rackham_error::{RackhamError, RackhamErrorKind, RackhamResult};
pub use rackham_interface::StoryDriver;
pub use rackham_models::{ModelClient, OpenAICompatibleClient, QuerySettings, RetryPolicy};
pub use rackham_pipeline::{Framework, PipelineOrchestrator};
pub use rackham_render::{RenderedFile, TemplateEngine};
pub use rackham_storage::{ContentStore, FileSystemStore};
