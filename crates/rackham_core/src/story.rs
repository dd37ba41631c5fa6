//! The input story and its derived title.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// How a title is picked out of the opening lines of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TitleRule {
    /// Title used when no opening line qualifies
    default_title: String,
    /// Number of leading lines considered
    scan_lines: usize,
    /// A candidate line must be shorter than this many characters
    max_length: usize,
}

impl TitleRule {
    /// Create a title rule.
    pub fn new(default_title: impl Into<String>, scan_lines: usize, max_length: usize) -> Self {
        Self {
            default_title: default_title.into(),
            scan_lines,
            max_length,
        }
    }

    /// Pick the title for a story text.
    ///
    /// The first non-empty line among the leading `scan_lines` that is shorter
    /// than `max_length`, stripped of everything except word characters,
    /// whitespace and hyphens, and still longer than three characters.
    pub fn derive(&self, text: &str) -> String {
        text.trim()
            .lines()
            .take(self.scan_lines)
            .map(str::trim)
            .filter(|line| !line.is_empty() && line.chars().count() < self.max_length)
            .map(sanitize_title)
            .find(|title| title.chars().count() > 3)
            .unwrap_or_else(|| self.default_title.clone())
    }
}

impl Default for TitleRule {
    fn default() -> Self {
        Self::new("Magical Story Adventure", 5, 100)
    }
}

fn sanitize_title(line: &str) -> String {
    line.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Raw story text with its derived title. Immutable once read.
///
/// # Examples
///
/// ```
/// use rackham_core::{Story, TitleRule};
///
/// let story = Story::new("The Brave Little Kite!\n\nOnce upon a time...", &TitleRule::default());
/// assert_eq!(story.title(), "The Brave Little Kite");
///
/// let untitled = Story::new("Hi.\nOk.", &TitleRule::default());
/// assert_eq!(untitled.title(), "Magical Story Adventure");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Story {
    title: String,
    text: String,
}

impl Story {
    /// Wrap story text, deriving its title.
    pub fn new(text: impl Into<String>, rule: &TitleRule) -> Self {
        let text = text.into();
        let title = rule.derive(&text);
        Self { title, text }
    }

    /// Length in characters after trimming surrounding whitespace.
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }

    /// Length in characters of the raw text.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the story has no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
