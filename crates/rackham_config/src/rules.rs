//! Extraction rules per entity kind.

use rackham_core::{EntityField, TitleRule};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Story input bounds and title derivation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoryRules {
    /// Minimum trimmed length in characters
    pub min_length: usize,
    /// Maximum length in characters
    pub max_length: usize,
    /// Title used when none can be derived
    pub default_title: String,
    /// Leading lines scanned for a title
    pub title_scan_lines: usize,
    /// Candidate title lines must be shorter than this
    pub title_max_length: usize,
}

impl StoryRules {
    /// Title rule for [`rackham_core::Story::new`].
    pub fn title_rule(&self) -> TitleRule {
        TitleRule::new(
            self.default_title.clone(),
            self.title_scan_lines,
            self.title_max_length,
        )
    }
}

/// A marker prefix and the field it populates.
///
/// ```toml
/// markers = [{ field = "name", marker = "Name:" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
#[serde(bound(deserialize = "F: DeserializeOwned"))]
pub struct FieldMarker<F> {
    /// Field set by lines starting with `marker`
    pub field: F,
    /// Literal line prefix
    pub marker: String,
}

impl<F> FieldMarker<F> {
    /// Create a marker.
    pub fn new(field: F, marker: impl Into<String>) -> Self {
        Self {
            field,
            marker: marker.into(),
        }
    }
}

/// Count range, completeness tolerance and marker table for one entity kind.
///
/// Marker order is significant: when several prefixes match a line the
/// first listed wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
#[serde(bound(deserialize = "F: DeserializeOwned"))]
pub struct EntityRules<F> {
    /// Fewest accepted records before the stage falls back
    pub min: usize,
    /// Records beyond this count are dropped
    pub max: usize,
    /// Required fields a record may lack and still be accepted
    pub max_missing_fields: usize,
    /// Fields counted by the completeness check
    pub required: Vec<F>,
    /// Role hint sent as the system message
    pub role_hint: String,
    /// Line prefixes, in priority order
    pub markers: Vec<FieldMarker<F>>,
}

impl<F: EntityField> EntityRules<F> {
    /// Check ranges and the marker table.
    pub(crate) fn check(&self, section: &str) -> Result<(), String> {
        if self.max == 0 {
            return Err(format!("{section}.max must be at least 1"));
        }
        if self.min > self.max {
            return Err(format!(
                "{section}.min ({}) exceeds {section}.max ({})",
                self.min, self.max
            ));
        }
        if self.markers.is_empty() {
            return Err(format!("{section}.markers must not be empty"));
        }
        for (i, entry) in self.markers.iter().enumerate() {
            if entry.marker.trim().is_empty() {
                return Err(format!("{section}.markers[{i}] is blank"));
            }
            if self.markers[..i].iter().any(|m| m.marker == entry.marker) {
                return Err(format!(
                    "{section}.markers lists \"{}\" more than once",
                    entry.marker
                ));
            }
        }
        if !self.markers.iter().any(|m| m.field == F::identity()) {
            return Err(format!(
                "{section}.markers has no marker for identity field '{}'",
                F::identity()
            ));
        }
        Ok(())
    }
}

/// Narration word range and optional block marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NarrationRules {
    /// Advisory minimum word count
    pub min_words: usize,
    /// Advisory maximum word count
    pub max_words: usize,
    /// Marker that opens the narration body, when the model uses one
    pub marker: String,
    /// Role hint sent as the system message
    pub role_hint: String,
}

/// Image prompt block format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImagePromptRules {
    /// Heading that opens each prompt block, followed by the scene title
    pub heading_marker: String,
    /// Role hint sent as the system message
    pub role_hint: String,
}
