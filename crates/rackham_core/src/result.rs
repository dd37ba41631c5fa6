//! Aggregate output of a pipeline run.

use crate::{Character, ImagePrompt, ProcessingStats, Scene, Story};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Everything a run produced, handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ProcessingResult {
    story: Story,
    characters: Vec<Character>,
    scenes: Vec<Scene>,
    narration: String,
    image_prompts: Vec<ImagePrompt>,
    stats: ProcessingStats,
}

impl ProcessingResult {
    /// Assemble a result.
    pub fn new(
        story: Story,
        characters: Vec<Character>,
        scenes: Vec<Scene>,
        narration: String,
        image_prompts: Vec<ImagePrompt>,
        stats: ProcessingStats,
    ) -> Self {
        Self {
            story,
            characters,
            scenes,
            narration,
            image_prompts,
            stats,
        }
    }

    /// Title derived from the story.
    pub fn title(&self) -> &str {
        self.story.title()
    }
}
