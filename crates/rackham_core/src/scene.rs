//! Scene entity.

use crate::{Entity, FieldRecord, SceneField};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One beat of the story.
///
/// `characters` is free text naming who appears; it is not checked against
/// the character roster.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option, into)]
pub struct Scene {
    #[setters(skip)]
    title: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    emotion: Option<String>,
    #[serde(default)]
    characters: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl Scene {
    /// Create a scene with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: None,
            emotion: None,
            characters: None,
            action: None,
            description: None,
        }
    }

    /// One-line summary used as context for later stages.
    pub fn summary_line(&self) -> String {
        format!(
            "- {}: {} at {}",
            self.title,
            self.emotion.as_deref().unwrap_or("neutral"),
            self.location.as_deref().unwrap_or("unknown")
        )
    }
}

impl Entity for Scene {
    type Field = SceneField;

    fn from_record(record: &FieldRecord<SceneField>) -> Option<Self> {
        let title = record.get_owned(SceneField::Title)?;
        Some(Self {
            title,
            location: record.get_owned(SceneField::Location),
            emotion: record.get_owned(SceneField::Emotion),
            characters: record.get_owned(SceneField::Characters),
            action: record.get_owned(SceneField::Action),
            description: record.get_owned(SceneField::Description),
        })
    }

    fn to_record(&self) -> FieldRecord<SceneField> {
        let mut record = FieldRecord::default();
        record.set(SceneField::Title, &self.title);
        let optional = [
            (SceneField::Location, &self.location),
            (SceneField::Emotion, &self.emotion),
            (SceneField::Characters, &self.characters),
            (SceneField::Action, &self.action),
            (SceneField::Description, &self.description),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                record.set(field, value);
            }
        }
        record
    }

    fn identity(&self) -> &str {
        &self.title
    }
}
