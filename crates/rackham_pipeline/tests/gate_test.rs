//! Quality gate acceptance and count rules.

use rackham_config::{EntityRules, RackhamConfig};
use rackham_core::{Character, CharacterField, FieldRecord};
use rackham_pipeline::{EntityValidator, RejectionReason, StageOutcome};

fn record(fields: &[(CharacterField, &str)]) -> FieldRecord<CharacterField> {
    let mut record = FieldRecord::default();
    for (field, value) in fields {
        record.set(*field, value);
    }
    record
}

fn complete(name: &str) -> FieldRecord<CharacterField> {
    record(&[
        (CharacterField::Name, name),
        (CharacterField::Role, "hero"),
        (CharacterField::Personality, "kind"),
        (CharacterField::Appearance, "tall"),
        (CharacterField::Motivation, "home"),
        (CharacterField::EmotionalTraits, "warm"),
        (CharacterField::Description, "a friend"),
    ])
}

fn rules() -> EntityRules<CharacterField> {
    RackhamConfig::bundled()
        .expect("bundled config")
        .characters
}

#[test]
fn test_missing_field_tolerance() {
    let rules = rules();
    let validator = EntityValidator::new(&rules);

    let two_missing = record(&[
        (CharacterField::Name, "Wren"),
        (CharacterField::Role, "hero"),
        (CharacterField::Personality, "kind"),
        (CharacterField::Appearance, "tall"),
        (CharacterField::Motivation, "home"),
    ]);
    let three_missing = record(&[
        (CharacterField::Name, "Wren"),
        (CharacterField::Role, "hero"),
        (CharacterField::Personality, "kind"),
        (CharacterField::Appearance, "tall"),
    ]);

    assert!(validator.accept(&complete("Wren")));
    assert!(validator.accept(&two_missing));
    assert!(!validator.accept(&three_missing));
}

#[test]
fn test_identity_field_always_required() {
    let mut rules = rules();
    rules.max_missing_fields = 7;
    let validator = EntityValidator::new(&rules);

    let nameless = record(&[(CharacterField::Role, "hero")]);
    let blank_name = record(&[(CharacterField::Name, "   "), (CharacterField::Role, "hero")]);

    assert!(!validator.accept(&nameless));
    assert!(!validator.accept(&blank_name));
    assert!(validator.accept(&record(&[(CharacterField::Name, "Wren")])));
}

#[test]
fn test_surplus_records_truncated_in_order() {
    let mut rules = rules();
    rules.max = 2;
    let records: Vec<_> = ["A", "B", "C"].iter().map(|n| complete(n)).collect();

    let outcome: StageOutcome<Vec<Character>> = EntityValidator::new(&rules).validate(&records);

    let StageOutcome::Accepted(characters) = outcome else {
        panic!("expected acceptance");
    };
    let names: Vec<_> = characters.iter().map(|c| c.name().as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_below_minimum_rejects_stage() {
    let mut rules = rules();
    rules.min = 2;
    let records = vec![complete("A"), record(&[(CharacterField::Role, "no name")])];

    let outcome: StageOutcome<Vec<Character>> = EntityValidator::new(&rules).validate(&records);

    assert_eq!(
        outcome,
        StageOutcome::Rejected(RejectionReason::BelowMinimum {
            accepted: 1,
            minimum: 2
        })
    );
}

#[test]
fn test_no_records_rejects_stage() {
    let rules = rules();
    let outcome: StageOutcome<Vec<Character>> = EntityValidator::new(&rules).validate(&[]);
    assert_eq!(outcome, StageOutcome::Rejected(RejectionReason::NoRecords));
    assert!(!outcome.is_accepted());
}
