//! Field vocabularies for each parsed entity kind.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use strum::IntoEnumIterator;

/// A named field of a parsed entity.
///
/// Implementors are plain enums so required-field lists and marker tables
/// can be checked at configuration load instead of failing on a typo later.
pub trait EntityField: Copy + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// The field that identifies a record. Records without it are never accepted.
    fn identity() -> Self;

    /// Every field in declaration order.
    fn all() -> Vec<Self>;
}

/// Fields of a character record.
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
pub enum CharacterField {
    /// Character name
    #[display("name")]
    Name,
    /// Narrative role (protagonist, supporting, ...)
    #[display("role")]
    Role,
    /// Personality traits
    #[display("personality")]
    Personality,
    /// Physical appearance
    #[display("appearance")]
    Appearance,
    /// What drives the character
    #[display("motivation")]
    Motivation,
    /// Emotional traits
    #[display("emotional_traits")]
    EmotionalTraits,
    /// Free-text description
    #[display("description")]
    Description,
}

impl EntityField for CharacterField {
    fn identity() -> Self {
        CharacterField::Name
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Fields of a scene record.
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
pub enum SceneField {
    /// Scene title
    #[display("title")]
    Title,
    /// Where the scene happens
    #[display("location")]
    Location,
    /// Dominant emotion
    #[display("emotion")]
    Emotion,
    /// Characters present, as free text
    #[display("characters")]
    Characters,
    /// What happens
    #[display("action")]
    Action,
    /// Free-text description
    #[display("description")]
    Description,
}

impl EntityField for SceneField {
    fn identity() -> Self {
        SceneField::Title
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

/// Fields of an image prompt block.
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
pub enum PromptField {
    /// Title of the scene the prompt illustrates
    #[display("scene")]
    Scene,
    /// Prompt text
    #[display("prompt")]
    Prompt,
}

impl EntityField for PromptField {
    fn identity() -> Self {
        PromptField::Scene
    }

    fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}
