//! Per-run processing statistics.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// The four ordered extraction stages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Character extraction
    #[display("characters")]
    Characters,
    /// Scene breakdown
    #[display("scenes")]
    Scenes,
    /// Narration script
    #[display("narration")]
    Narration,
    /// Image prompts
    #[display("image prompts")]
    ImagePrompts,
}

/// Which path produced a stage's output.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMethod {
    /// Accepted model output
    #[display("model")]
    Model,
    /// Deterministic offline synthesis
    #[display("fallback")]
    Fallback,
    /// Model output completed by synthesis
    #[display("mixed")]
    Mixed,
}

/// Outcome of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct StageReport {
    stage: Stage,
    method: ProcessingMethod,
    note: Option<String>,
}

impl StageReport {
    /// Create a stage report.
    pub fn new(stage: Stage, method: ProcessingMethod, note: Option<String>) -> Self {
        Self {
            stage,
            method,
            note,
        }
    }
}

/// Counts and degradations for one pipeline run.
///
/// A caller can tell a fully model-driven run from a degraded one by
/// looking at [`ProcessingStats::method`] and the per-stage reports.
///
/// # Examples
///
/// ```
/// use rackham_core::{ProcessingMethod, ProcessingStats, Stage, StageReport};
///
/// let mut stats = ProcessingStats::default();
/// stats.record_stage(StageReport::new(Stage::Characters, ProcessingMethod::Model, None));
/// stats.record_stage(StageReport::new(
///     Stage::Scenes,
///     ProcessingMethod::Fallback,
///     Some("model unavailable".to_string()),
/// ));
///
/// assert_eq!(stats.method(), ProcessingMethod::Mixed);
/// assert!(stats.is_degraded());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ProcessingStats {
    character_count: usize,
    scene_count: usize,
    image_prompt_count: usize,
    narration_words: usize,
    synthesized_prompts: usize,
    stages: Vec<StageReport>,
    warnings: Vec<String>,
}

impl ProcessingStats {
    /// Record how a stage was produced.
    pub fn record_stage(&mut self, report: StageReport) {
        self.stages.push(report);
    }

    /// Record a non-fatal invariant violation.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Record how many image prompts were synthesized to cover unmatched scenes.
    pub fn set_synthesized_prompts(&mut self, count: usize) {
        self.synthesized_prompts = count;
    }

    /// Fill in final entity counts.
    pub fn set_counts(
        &mut self,
        characters: usize,
        scenes: usize,
        image_prompts: usize,
        narration_words: usize,
    ) {
        self.character_count = characters;
        self.scene_count = scenes;
        self.image_prompt_count = image_prompts;
        self.narration_words = narration_words;
    }

    /// Report for a given stage, if it ran.
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    /// Overall method across all recorded stages.
    pub fn method(&self) -> ProcessingMethod {
        let all = |m: ProcessingMethod| self.stages.iter().all(|r| r.method == m);
        if all(ProcessingMethod::Model) {
            ProcessingMethod::Model
        } else if all(ProcessingMethod::Fallback) {
            ProcessingMethod::Fallback
        } else {
            ProcessingMethod::Mixed
        }
    }

    /// True if any stage did not come purely from the model.
    pub fn is_degraded(&self) -> bool {
        self.method() != ProcessingMethod::Model
    }
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
