//! Character entity.

use crate::{CharacterField, Entity, FieldRecord};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A character extracted from the story.
///
/// Only the name is guaranteed. Every other attribute is whatever the
/// extraction stage managed to recover.
///
/// # Examples
///
/// ```
/// use rackham_core::Character;
///
/// let pip = Character::new("Pip").with_role("protagonist");
/// assert_eq!(pip.name(), "Pip");
/// assert_eq!(pip.role().as_deref(), Some("protagonist"));
/// assert!(pip.motivation().is_none());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option, into)]
pub struct Character {
    #[setters(skip)]
    name: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    personality: Option<String>,
    #[serde(default)]
    appearance: Option<String>,
    #[serde(default)]
    motivation: Option<String>,
    #[serde(default)]
    emotional_traits: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl Character {
    /// Create a character with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            personality: None,
            appearance: None,
            motivation: None,
            emotional_traits: None,
            description: None,
        }
    }

    /// One-line summary used as context for later stages.
    pub fn summary_line(&self) -> String {
        format!(
            "- {}: {}",
            self.name,
            self.role.as_deref().unwrap_or("character")
        )
    }
}

impl Entity for Character {
    type Field = CharacterField;

    fn from_record(record: &FieldRecord<CharacterField>) -> Option<Self> {
        let name = record.get_owned(CharacterField::Name)?;
        Some(Self {
            name,
            role: record.get_owned(CharacterField::Role),
            personality: record.get_owned(CharacterField::Personality),
            appearance: record.get_owned(CharacterField::Appearance),
            motivation: record.get_owned(CharacterField::Motivation),
            emotional_traits: record.get_owned(CharacterField::EmotionalTraits),
            description: record.get_owned(CharacterField::Description),
        })
    }

    fn to_record(&self) -> FieldRecord<CharacterField> {
        let mut record = FieldRecord::default();
        record.set(CharacterField::Name, &self.name);
        let optional = [
            (CharacterField::Role, &self.role),
            (CharacterField::Personality, &self.personality),
            (CharacterField::Appearance, &self.appearance),
            (CharacterField::Motivation, &self.motivation),
            (CharacterField::EmotionalTraits, &self.emotional_traits),
            (CharacterField::Description, &self.description),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                record.set(field, value);
            }
        }
        record
    }

    fn identity(&self) -> &str {
        &self.name
    }
}
