//! Image prompt entity.

use crate::{Entity, FieldRecord, PromptField};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Illustration prompt for one scene, referenced by scene title.
///
/// # Examples
///
/// ```
/// use rackham_core::ImagePrompt;
///
/// let prompt = ImagePrompt::new("The Storm", "A tiny boat on giant waves");
/// assert_eq!(prompt.scene(), "The Storm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ImagePrompt {
    scene: String,
    prompt: String,
}

impl ImagePrompt {
    /// Create a prompt for the scene with the given title.
    pub fn new(scene: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            prompt: prompt.into(),
        }
    }

    /// Re-point this prompt at a different scene title.
    pub fn for_scene(self, scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            prompt: self.prompt,
        }
    }
}

impl Entity for ImagePrompt {
    type Field = PromptField;

    fn from_record(record: &FieldRecord<PromptField>) -> Option<Self> {
        Some(Self {
            scene: record.get_owned(PromptField::Scene)?,
            prompt: record.get_owned(PromptField::Prompt).unwrap_or_default(),
        })
    }

    fn to_record(&self) -> FieldRecord<PromptField> {
        let mut record = FieldRecord::default();
        record.set(PromptField::Scene, &self.scene);
        if !self.prompt.is_empty() {
            record.set(PromptField::Prompt, &self.prompt);
        }
        record
    }

    fn identity(&self) -> &str {
        &self.scene
    }
}
