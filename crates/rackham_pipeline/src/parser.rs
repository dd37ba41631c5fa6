//! Line-oriented block parser for model responses.
//!
//! Model output is loosely structured text: labelled lines grouped into
//! blocks. The parser knows nothing about characters or scenes. A
//! [`MarkerSet`] says which lines carry which field, and a [`ParseMode`]
//! says where records end and what happens to unlabelled lines.

use rackham_config::FieldMarker;
use rackham_core::{EntityField, FieldRecord, PromptField};
use tracing::{debug, instrument};

/// Recognises field-carrying lines.
pub trait MarkerSet {
    /// Field vocabulary produced by this marker set.
    type Field: EntityField;

    /// Fields set by `line`, which arrives trimmed and non-empty.
    ///
    /// An empty result means the line carries no marker.
    fn match_line<'a>(&self, line: &'a str) -> Vec<(Self::Field, &'a str)>;

    /// Field whose appearance opens a new record under
    /// [`RecordBoundary::OpeningField`].
    fn opening_field(&self) -> Self::Field {
        Self::Field::identity()
    }

    /// Field that receives unmarked lines, if fixed.
    ///
    /// `None` appends to whichever field was set last.
    fn continuation_field(&self) -> Option<Self::Field> {
        None
    }
}

/// Ordered `prefix -> field` table.
///
/// The first prefix that matches a line wins, and the value is the trimmed
/// remainder of the line.
///
/// # Examples
///
/// ```
/// use rackham_config::FieldMarker;
/// use rackham_core::SceneField;
/// use rackham_pipeline::{MarkerSet, PrefixMarkers};
///
/// let markers = PrefixMarkers::new(vec![
///     FieldMarker::new(SceneField::Title, "Scene:"),
///     FieldMarker::new(SceneField::Location, "Location:"),
/// ]);
/// assert_eq!(
///     markers.match_line("Location:  the lighthouse"),
///     vec![(SceneField::Location, "the lighthouse")]
/// );
/// assert!(markers.match_line("The wind howled.").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct PrefixMarkers<F> {
    markers: Vec<FieldMarker<F>>,
}

impl<F: EntityField> PrefixMarkers<F> {
    /// Create a marker table. Order is priority order.
    pub fn new(markers: Vec<FieldMarker<F>>) -> Self {
        Self { markers }
    }

    /// Write records back out in the format [`BlockParser`] reads.
    ///
    /// Each field is written with its first listed marker, in marker order,
    /// and records are separated by a blank line.
    pub fn write_records(&self, records: &[FieldRecord<F>]) -> String {
        let mut blocks = Vec::with_capacity(records.len());
        for record in records {
            let mut lines = Vec::new();
            let mut written: Vec<F> = Vec::new();
            for entry in &self.markers {
                if written.contains(&entry.field) {
                    continue;
                }
                written.push(entry.field);
                if let Some(value) = record.get(entry.field) {
                    lines.push(format!("{} {}", entry.marker, value));
                }
            }
            if !lines.is_empty() {
                blocks.push(lines.join("\n"));
            }
        }
        blocks.join("\n\n")
    }
}

impl<F: EntityField> From<&[FieldMarker<F>]> for PrefixMarkers<F> {
    fn from(markers: &[FieldMarker<F>]) -> Self {
        Self::new(markers.to_vec())
    }
}

impl<F: EntityField> MarkerSet for PrefixMarkers<F> {
    type Field = F;

    fn match_line<'a>(&self, line: &'a str) -> Vec<(F, &'a str)> {
        self.markers
            .iter()
            .find_map(|m| {
                line.strip_prefix(m.marker.as_str())
                    .map(|rest| (m.field, rest.trim()))
            })
            .into_iter()
            .collect()
    }
}

/// `"<heading> <scene reference>:"` blocks.
///
/// The heading opens a prompt record and everything after it on the line,
/// minus trailing colons and quotes, is the scene reference. References such
/// as `Scene 2: The Storm` are kept whole for title matching. Unmarked lines
/// after the heading are prompt text. The heading must be followed by
/// whitespace, so `Prompt formatting` is not a heading.
///
/// # Examples
///
/// ```
/// use rackham_core::PromptField;
/// use rackham_pipeline::{HeadingMarkers, MarkerSet};
///
/// let markers = HeadingMarkers::new("Prompt for");
/// assert_eq!(
///     markers.match_line("Prompt for The Storm:"),
///     vec![(PromptField::Scene, "The Storm")]
/// );
/// assert_eq!(
///     markers.match_line("Prompt for Scene 2: The Storm"),
///     vec![(PromptField::Scene, "Scene 2: The Storm")]
/// );
/// assert!(markers.match_line("Prompt formatting notes: keep it short").is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct HeadingMarkers {
    heading: String,
}

impl HeadingMarkers {
    /// Create a heading marker set.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
        }
    }
}

fn scene_reference(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}

impl MarkerSet for HeadingMarkers {
    type Field = PromptField;

    fn match_line<'a>(&self, line: &'a str) -> Vec<(PromptField, &'a str)> {
        let Some(rest) = line.strip_prefix(self.heading.as_str()) else {
            return Vec::new();
        };
        if !rest.starts_with(char::is_whitespace) {
            return Vec::new();
        }
        let scene = scene_reference(rest.trim().trim_end_matches(':'));
        if scene.is_empty() {
            return Vec::new();
        }
        vec![(PromptField::Scene, scene)]
    }

    fn opening_field(&self) -> PromptField {
        PromptField::Scene
    }

    fn continuation_field(&self) -> Option<PromptField> {
        Some(PromptField::Prompt)
    }
}

/// What terminates a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordBoundary {
    /// A blank line closes the open record
    BlankLine,
    /// The marker set's opening field starts a new record; blank lines are ignored
    OpeningField,
}

/// What happens to a non-empty line that carries no marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Discard it
    Ignore,
    /// Append it to the open record, joined with the separator
    Append(String),
}

/// Record boundary and continuation policy for a [`BlockParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMode {
    /// Record terminator
    pub boundary: RecordBoundary,
    /// Unmarked line handling
    pub continuation: Continuation,
}

impl ParseMode {
    /// Blank-line separated blocks, unmarked lines dropped.
    pub fn blocks() -> Self {
        Self {
            boundary: RecordBoundary::BlankLine,
            continuation: Continuation::Ignore,
        }
    }

    /// Heading-opened blocks, unmarked lines appended with `separator`.
    pub fn headed(separator: impl Into<String>) -> Self {
        Self {
            boundary: RecordBoundary::OpeningField,
            continuation: Continuation::Append(separator.into()),
        }
    }
}

/// Splits free text into field records.
///
/// Parsing never fails: lines it cannot place are skipped, and text with
/// no markers at all yields no records.
///
/// # Examples
///
/// ```
/// use rackham_config::FieldMarker;
/// use rackham_core::CharacterField;
/// use rackham_pipeline::{BlockParser, ParseMode, PrefixMarkers};
///
/// let parser = BlockParser::new(
///     PrefixMarkers::new(vec![
///         FieldMarker::new(CharacterField::Name, "Name:"),
///         FieldMarker::new(CharacterField::Role, "Role:"),
///     ]),
///     ParseMode::blocks(),
/// );
///
/// let records = parser.parse("Name: Pip\nRole: hero\n\nName: Moss\n");
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].get(CharacterField::Name), Some("Moss"));
/// ```
#[derive(Debug, Clone)]
pub struct BlockParser<M> {
    markers: M,
    mode: ParseMode,
}

impl<M: MarkerSet> BlockParser<M> {
    /// Create a parser.
    pub fn new(markers: M, mode: ParseMode) -> Self {
        Self { markers, mode }
    }

    /// The marker set in use.
    pub fn markers(&self) -> &M {
        &self.markers
    }

    /// Parse text into records, in order of appearance. Empty records are skipped.
    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn parse(&self, text: &str) -> Vec<FieldRecord<M::Field>> {
        let mut records = Vec::new();
        let mut current = FieldRecord::default();

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                if self.mode.boundary == RecordBoundary::BlankLine {
                    close(&mut current, &mut records);
                }
                continue;
            }

            let matches = self.markers.match_line(line);
            if matches.is_empty() {
                self.continue_record(&mut current, line);
                continue;
            }

            let opens = self.mode.boundary == RecordBoundary::OpeningField
                && matches
                    .iter()
                    .any(|(field, _)| *field == self.markers.opening_field());
            if opens {
                close(&mut current, &mut records);
            }
            for (field, value) in matches {
                current.set(field, value);
            }
        }
        close(&mut current, &mut records);

        debug!(records = records.len(), "Parsed response");
        records
    }

    fn continue_record(&self, current: &mut FieldRecord<M::Field>, line: &str) {
        let Continuation::Append(separator) = &self.mode.continuation else {
            return;
        };
        if current.is_empty() {
            debug!(line, "Skipping unmarked line outside a record");
            return;
        }
        if let Some(field) = self.markers.continuation_field().or(current.last_field()) {
            current.append(field, separator, line);
        }
    }
}

fn close<F: EntityField>(current: &mut FieldRecord<F>, records: &mut Vec<FieldRecord<F>>) {
    if !current.is_empty() {
        records.push(std::mem::take(current));
    }
}
