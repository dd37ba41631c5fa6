//! Story processing pipeline.
//!
//! Turns one story into characters, scenes, a narration script and one
//! image prompt per scene. Four stages run in order, each asking the model
//! service through [`rackham_models::ModelClient`]:
//!
//! 1. characters
//! 2. scenes (given the character summary)
//! 3. narration (given character and scene summaries)
//! 4. image prompts (given the full scene and character data)
//!
//! Each response goes through the [`BlockParser`] and the [`EntityValidator`].
//! Whenever a stage cannot produce acceptable output, whether the service is
//! unreachable, the response is unparseable or too few records pass, the
//! [`FallbackSynthesizer`] supplies deterministic content instead. The run
//! therefore always completes with count-valid output unless the story input
//! itself is rejected.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fallback;
mod framework;
mod gate;
mod orchestrator;
mod parser;
mod prompts;
mod reconcile;
mod stage;

pub use fallback::FallbackSynthesizer;
pub use framework::Framework;
pub use gate::EntityValidator;
pub use orchestrator::PipelineOrchestrator;
pub use parser::{
    BlockParser, Continuation, HeadingMarkers, MarkerSet, ParseMode, PrefixMarkers,
    RecordBoundary,
};
pub use prompts::QueryBuilder;
pub use reconcile::{PromptReconciliation, reconcile_prompts};
pub use stage::{RejectionReason, StageOutcome};
