//! Tests for configuration loading and validation.

use rackham_config::{FieldMarker, InputKey, RackhamConfig};
use rackham_core::{CharacterField, SceneField};
use std::io::Write;
use tempfile::Builder;

#[test]
fn bundled_defaults_match_documented_values() {
    let config = RackhamConfig::bundled().unwrap();

    assert_eq!(config.model.model, "deepseek-chat");
    assert_eq!(config.model.max_tokens, 4000);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.base_delay_ms, 2000);
    assert_eq!(config.story.min_length, 100);
    assert_eq!((config.characters.min, config.characters.max), (1, 8));
    assert_eq!((config.scenes.min, config.scenes.max), (4, 8));
    assert_eq!(config.characters.max_missing_fields, 2);
    assert_eq!(config.characters.required.len(), 7);
    assert_eq!(config.scenes.required.len(), 6);
    assert_eq!(
        config.characters.markers[5],
        FieldMarker::new(CharacterField::EmotionalTraits, "Emotional Traits:")
    );
    assert_eq!(config.scenes.markers[0].field, SceneField::Title);
}

#[test]
fn file_overrides_layer_over_defaults() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[scenes]
min = 2
max = 5
max_missing_fields = 1
required = ["title", "emotion"]
role_hint = "Split the story."
markers = [{{ field = "title", marker = "Scene:" }}]

[retry]
max_attempts = 5
base_delay_ms = 10
"#
    )
    .unwrap();

    let config = RackhamConfig::from_file(temp_file.path()).unwrap();
    assert_eq!((config.scenes.min, config.scenes.max), (2, 5));
    assert_eq!(config.scenes.markers.len(), 1);
    assert_eq!(config.retry.max_attempts, 5);
    // Untouched sections keep bundled values.
    assert_eq!(config.characters.max, 8);
}

#[test]
fn missing_file_is_an_error() {
    let err = RackhamConfig::from_file("/definitely/not/here/rackham.toml").unwrap_err();
    assert!(format!("{err}").contains("not found"));
}

#[test]
fn unknown_field_name_is_rejected() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        temp_file,
        r#"
[characters]
min = 1
max = 8
max_missing_fields = 2
required = ["name", "favourite_colour"]
role_hint = "x"
markers = [{{ field = "name", marker = "Name:" }}]
"#
    )
    .unwrap();

    assert!(RackhamConfig::from_file(temp_file.path()).is_err());
}

#[test]
fn inverted_range_fails_validation() {
    let mut config = RackhamConfig::bundled().unwrap();
    config.scenes.min = 9;
    let err = config.validate().unwrap_err();
    assert!(format!("{err}").contains("scenes.min"));
}

#[test]
fn identity_marker_is_required() {
    let mut config = RackhamConfig::bundled().unwrap();
    config
        .characters
        .markers
        .retain(|m| m.field != CharacterField::Name);
    let err = config.validate().unwrap_err();
    assert!(format!("{err}").contains("identity field 'name'"));
}

#[test]
fn duplicate_markers_fail_validation() {
    let mut config = RackhamConfig::bundled().unwrap();
    config
        .scenes
        .markers
        .push(FieldMarker::new(SceneField::Description, "Title:"));
    assert!(config.validate().is_err());
}

#[test]
fn zero_attempts_fail_validation() {
    let mut config = RackhamConfig::bundled().unwrap();
    config.retry.max_attempts = 0;
    assert!(config.validate().is_err());
}

#[test]
fn input_paths_follow_layout() {
    let config = RackhamConfig::bundled().unwrap();
    assert_eq!(
        config.layout.path_of(InputKey::Story),
        "(in)/story_input.txt"
    );
    assert_eq!(
        config.layout.path_of(InputKey::PromptQueries),
        "(in)/ai_queries/prompt_queries.txt"
    );
    assert_eq!(
        config.layout.path_of(InputKey::VisualRules),
        "(in)/style_guides/visual_rules.txt"
    );
    assert_eq!(config.layout.inputs().len(), 9);
}
