use rackham_core::{
    Character, CharacterField, Entity, EntityField, FieldRecord, ImagePrompt, ProcessingMethod,
    ProcessingStats, PromptField, Scene, SceneField, Stage, StageReport,
};

#[test]
fn later_values_replace_earlier_ones() {
    let mut record = FieldRecord::default();
    record.set(SceneField::Title, "First");
    record.set(SceneField::Title, "Second");
    assert_eq!(record.get(SceneField::Title), Some("Second"));
}

#[test]
fn append_extends_last_field() {
    let mut record = FieldRecord::default();
    assert!(!record.append_to_last(" ", "orphan"));

    record.set(PromptField::Scene, "The Storm");
    record.set(PromptField::Prompt, "");
    assert!(record.append_to_last(" ", "Dark clouds"));
    assert!(record.append_to_last(" ", "  over the sea "));
    assert_eq!(
        record.get(PromptField::Prompt),
        Some("Dark clouds over the sea")
    );
}

#[test]
fn equality_ignores_insertion_order() {
    let mut a = FieldRecord::default();
    a.set(CharacterField::Name, "Pip");
    a.set(CharacterField::Role, "hero");

    let mut b = FieldRecord::default();
    b.set(CharacterField::Role, "hero");
    b.set(CharacterField::Name, "Pip");

    assert_eq!(a, b);
}

#[test]
fn character_requires_name() {
    let mut record = FieldRecord::default();
    record.set(CharacterField::Role, "sidekick");
    assert!(Character::from_record(&record).is_none());

    record.set(CharacterField::Name, "Moss");
    let moss = Character::from_record(&record).expect("named record builds");
    assert_eq!(moss.name(), "Moss");
    assert_eq!(moss.role().as_deref(), Some("sidekick"));
    assert_eq!(moss.to_record(), record);
}

#[test]
fn scene_summary_uses_defaults() {
    let scene = Scene::new("Into the Woods");
    assert_eq!(scene.summary_line(), "- Into the Woods: neutral at unknown");

    let scene = scene.with_emotion("curious").with_location("Old Forest");
    assert_eq!(scene.summary_line(), "- Into the Woods: curious at Old Forest");
}

#[test]
fn character_summary_uses_default_role() {
    assert_eq!(Character::new("Pip").summary_line(), "- Pip: character");
}

#[test]
fn prompt_without_text_still_builds() {
    let mut record = FieldRecord::default();
    record.set(PromptField::Scene, "Dawn");
    let prompt = ImagePrompt::from_record(&record).expect("scene is present");
    assert_eq!(prompt.prompt(), "");
}

#[test]
fn identity_fields() {
    assert_eq!(CharacterField::identity(), CharacterField::Name);
    assert_eq!(SceneField::identity(), SceneField::Title);
    assert_eq!(CharacterField::all().len(), 7);
    assert_eq!(SceneField::all().len(), 6);
}

#[test]
fn stats_method_reflects_stage_mix() {
    let mut stats = ProcessingStats::default();
    for stage in [Stage::Characters, Stage::Scenes] {
        stats.record_stage(StageReport::new(stage, ProcessingMethod::Fallback, None));
    }
    assert_eq!(stats.method(), ProcessingMethod::Fallback);

    stats.record_stage(StageReport::new(Stage::Narration, ProcessingMethod::Model, None));
    assert_eq!(stats.method(), ProcessingMethod::Mixed);
    assert_eq!(
        stats.stage(Stage::Narration).map(|r| *r.method()),
        Some(ProcessingMethod::Model)
    );
}
