//! Loosely-typed records produced by the block parser.

use crate::EntityField;
use std::collections::BTreeMap;

/// Field values collected for one parsed block.
///
/// Values are stored trimmed. Setting a field twice keeps the latest value.
///
/// # Examples
///
/// ```
/// use rackham_core::{CharacterField, FieldRecord};
///
/// let mut record = FieldRecord::default();
/// record.set(CharacterField::Name, "  Pip ");
/// record.set(CharacterField::Role, "");
///
/// assert_eq!(record.get(CharacterField::Name), Some("Pip"));
/// assert_eq!(record.get(CharacterField::Role), None);
/// assert_eq!(record.missing(&[CharacterField::Name, CharacterField::Role]).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FieldRecord<F: EntityField> {
    values: BTreeMap<F, String>,
    last: Option<F>,
}

impl<F: EntityField> Default for FieldRecord<F> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            last: None,
        }
    }
}

impl<F: EntityField> FieldRecord<F> {
    /// Set a field, replacing any earlier value.
    pub fn set(&mut self, field: F, value: &str) {
        self.values.insert(field, value.trim().to_string());
        self.last = Some(field);
    }

    /// Append text to a field, separated from any existing value.
    pub fn append(&mut self, field: F, separator: &str, text: &str) {
        let text = text.trim();
        let entry = self.values.entry(field).or_default();
        if !entry.is_empty() {
            entry.push_str(separator);
        }
        entry.push_str(text);
        self.last = Some(field);
    }

    /// Append text to the most recently set field.
    ///
    /// Returns `false` when no field has been set yet.
    pub fn append_to_last(&mut self, separator: &str, text: &str) -> bool {
        match self.last {
            Some(field) => {
                self.append(field, separator, text);
                true
            }
            None => false,
        }
    }

    /// Non-empty value of a field.
    pub fn get(&self, field: F) -> Option<&str> {
        self.values
            .get(&field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Owned copy of a non-empty field value.
    pub fn get_owned(&self, field: F) -> Option<String> {
        self.get(field).map(str::to_string)
    }

    /// Required fields that are absent or empty.
    pub fn missing(&self, required: &[F]) -> Vec<F> {
        required
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// The field most recently set.
    pub fn last_field(&self) -> Option<F> {
        self.last
    }

    /// True when no field has been set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-empty values in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(f, v)| (*f, v.as_str()))
    }
}

// Equality ignores which field was set last.
impl<F: EntityField> PartialEq for FieldRecord<F> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<F: EntityField> Eq for FieldRecord<F> {}

/// A typed entity that can be built from, and flattened into, a field record.
pub trait Entity: Sized {
    /// Field vocabulary of this entity.
    type Field: EntityField;

    /// Build the entity. Returns `None` when the identity field is missing.
    fn from_record(record: &FieldRecord<Self::Field>) -> Option<Self>;

    /// Flatten the entity into a record.
    fn to_record(&self) -> FieldRecord<Self::Field>;

    /// The identity value (name or title).
    fn identity(&self) -> &str;
}
