//! Quality gate for parsed records.

use crate::{RejectionReason, StageOutcome};
use rackham_config::EntityRules;
use rackham_core::{Entity, EntityField, FieldRecord};
use tracing::{debug, instrument, warn};

/// Decides which parsed records become entities.
///
/// A record is accepted when its identity field is present and no more
/// than `max_missing_fields` of the required fields are absent. The
/// accepted sequence is then held to the configured count range: surplus
/// records are dropped from the end, and too few rejects the whole stage.
#[derive(Debug, Clone, Copy)]
pub struct EntityValidator<'a, F> {
    rules: &'a EntityRules<F>,
}

impl<'a, F: EntityField> EntityValidator<'a, F> {
    /// Create a validator over one entity kind's rules.
    pub fn new(rules: &'a EntityRules<F>) -> Self {
        Self { rules }
    }

    /// Whether a single record passes the completeness check.
    pub fn accept(&self, record: &FieldRecord<F>) -> bool {
        if record.get(F::identity()).is_none() {
            debug!(identity = %F::identity(), "Rejecting record without identity field");
            return false;
        }
        let missing = record.missing(&self.rules.required);
        if missing.is_empty() {
            return true;
        }
        let names = missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        warn!(missing = %names, "Record missing fields");
        missing.len() <= self.rules.max_missing_fields
    }

    /// Gate every record and enforce the count range.
    #[instrument(skip_all, fields(parsed = records.len(), min = self.rules.min, max = self.rules.max))]
    pub fn validate<T>(&self, records: &[FieldRecord<F>]) -> StageOutcome<Vec<T>>
    where
        T: Entity<Field = F>,
    {
        if records.is_empty() {
            return StageOutcome::Rejected(RejectionReason::NoRecords);
        }

        let mut entities: Vec<T> = records
            .iter()
            .filter(|record| self.accept(record))
            .filter_map(T::from_record)
            .collect();

        if entities.len() > self.rules.max {
            warn!(
                accepted = entities.len(),
                max = self.rules.max,
                "Truncating to maximum"
            );
            entities.truncate(self.rules.max);
        }

        if entities.is_empty() || entities.len() < self.rules.min {
            return StageOutcome::Rejected(RejectionReason::BelowMinimum {
                accepted: entities.len(),
                minimum: self.rules.min,
            });
        }

        debug!(accepted = entities.len(), "Records passed quality gate");
        StageOutcome::Accepted(entities)
    }
}
