//! Block parser behaviour over realistic model output.

use rackham_config::{FieldMarker, RackhamConfig};
use rackham_core::{
    Character, CharacterField, Entity, FieldRecord, ImagePrompt, Scene, SceneField,
};
use rackham_pipeline::{BlockParser, HeadingMarkers, ParseMode, PrefixMarkers, reconcile_prompts};

fn character_parser(config: &RackhamConfig) -> BlockParser<PrefixMarkers<CharacterField>> {
    BlockParser::new(
        PrefixMarkers::from(config.characters.markers.as_slice()),
        ParseMode::blocks(),
    )
}

#[test]
fn test_written_records_parse_back_identically() -> anyhow::Result<()> {
    let config = RackhamConfig::bundled()?;
    let scenes = vec![
        Scene::new("Harbour at Dawn")
            .with_location("the harbour")
            .with_emotion("calm")
            .with_characters("Wren")
            .with_action("Boats drift out")
            .with_description("Mist over the water."),
        Scene::new("Storm").with_emotion("afraid"),
    ];
    let markers = PrefixMarkers::from(config.scenes.markers.as_slice());
    let records: Vec<FieldRecord<SceneField>> = scenes.iter().map(Entity::to_record).collect();

    let text = markers.write_records(&records);
    let parsed = BlockParser::new(markers, ParseMode::blocks()).parse(&text);

    assert_eq!(parsed, records);
    let rebuilt: Vec<Scene> = parsed.iter().filter_map(Scene::from_record).collect();
    assert_eq!(rebuilt, scenes);
    Ok(())
}

#[test]
fn test_blank_line_closes_record() -> anyhow::Result<()> {
    let config = RackhamConfig::bundled()?;
    let text = "Name: Wren\nRole: keeper\n\n\n\nName: Bramble\nPersonality: curious\n";

    let records = character_parser(&config).parse(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get(CharacterField::Role), Some("keeper"));
    assert_eq!(records[1].get(CharacterField::Role), None);
    assert_eq!(records[1].get(CharacterField::Personality), Some("curious"));
    Ok(())
}

#[test]
fn test_unmarked_lines_and_indentation() -> anyhow::Result<()> {
    let config = RackhamConfig::bundled()?;
    let text = "Sure! Here are the characters.\n\n   Name:   Wren  \n  Role: keeper\nShe is very brave.\n";

    let records = character_parser(&config).parse(text);

    assert_eq!(records.len(), 1);
    let wren = Character::from_record(&records[0]).expect("name present");
    assert_eq!(wren.name(), "Wren");
    assert_eq!(wren.role().as_deref(), Some("keeper"));
    assert!(wren.description().is_none());
    Ok(())
}

#[test]
fn test_repeated_marker_keeps_latest_value() {
    let parser = BlockParser::new(
        PrefixMarkers::new(vec![FieldMarker::new(CharacterField::Name, "Name:")]),
        ParseMode::blocks(),
    );

    let records = parser.parse("Name: First\nName: Second");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get(CharacterField::Name), Some("Second"));
}

#[test]
fn test_prose_yields_no_records() -> anyhow::Result<()> {
    let config = RackhamConfig::bundled()?;
    let records = character_parser(&config).parse("Once upon a time there was a fox.\n\nThe end.");
    assert!(records.is_empty());
    assert!(character_parser(&config).parse("").is_empty());
    Ok(())
}

#[test]
fn test_append_continuation_targets_last_field() {
    let parser = BlockParser::new(
        PrefixMarkers::new(vec![
            FieldMarker::new(CharacterField::Name, "Name:"),
            FieldMarker::new(CharacterField::Description, "Description:"),
        ]),
        ParseMode {
            boundary: rackham_pipeline::RecordBoundary::BlankLine,
            continuation: rackham_pipeline::Continuation::Append(" ".to_string()),
        },
    );

    let records = parser.parse("Name: Wren\nDescription: keeps the\nold lantern lit");

    assert_eq!(
        records[0].get(CharacterField::Description),
        Some("keeps the old lantern lit")
    );
}

#[test]
fn test_numbered_headings_match_scenes_by_title() {
    let parser = BlockParser::new(HeadingMarkers::new("Prompt for"), ParseMode::headed(" "));
    let text = "Prompt for Scene 2: The Storm\nWaves crash on the rocks.\n\n\
                Prompt for Scene 1: The Calm\nStill water.";
    let parsed: Vec<ImagePrompt> = parser
        .parse(text)
        .iter()
        .filter_map(ImagePrompt::from_record)
        .collect();
    let scenes = vec![Scene::new("The Calm"), Scene::new("The Storm")];

    let result = reconcile_prompts(parsed, &scenes, |s| ImagePrompt::new(s.title(), "default"));

    assert_eq!(
        result.prompts,
        vec![
            ImagePrompt::new("The Calm", "Still water."),
            ImagePrompt::new("The Storm", "Waves crash on the rocks."),
        ]
    );
    assert_eq!(result.synthesized, 0);
}

#[test]
fn test_lines_merely_starting_with_heading_are_not_prompts() {
    let parser = BlockParser::new(HeadingMarkers::new("Prompt for"), ParseMode::headed(" "));
    let records = parser.parse("Prompt formatting notes: keep it short\nPrompt for The Calm:\nStill.");
    let prompts: Vec<ImagePrompt> = records.iter().filter_map(ImagePrompt::from_record).collect();
    assert_eq!(prompts, vec![ImagePrompt::new("The Calm", "Still.")]);
}
