//! Rendered artifact content.

use chrono::{Local, TimeZone};
use rackham_config::RackhamConfig;
use rackham_core::{
    Character, ImagePrompt, ProcessingMethod, ProcessingResult, ProcessingStats, Scene, Stage,
    StageReport, Story, TitleRule,
};
use rackham_render::TemplateEngine;
use std::time::Duration;

fn sample() -> ProcessingResult {
    let story = Story::new(
        "The Lantern Keeper\n\nWren kept the lantern lit for the boats.",
        &TitleRule::default(),
    );
    let characters = vec![
        Character::new("Wren")
            .with_role("protagonist")
            .with_description("The lantern keeper."),
        Character::new("Bramble"),
    ];
    let scenes = vec![
        Scene::new("The Storm")
            .with_emotion("scary")
            .with_action("Running up the tower steps")
            .with_description("Waves crash below."),
        Scene::new("Morning"),
    ];
    let prompts = vec![
        ImagePrompt::new("The Storm", "A lighthouse with glowing windows, showing huge waves"),
        ImagePrompt::new("Morning", "A calm harbour at dawn"),
    ];
    let mut stats = ProcessingStats::default();
    stats.record_stage(StageReport::new(Stage::Characters, ProcessingMethod::Model, None));
    stats.record_stage(StageReport::new(
        Stage::Scenes,
        ProcessingMethod::Fallback,
        Some("model unavailable".to_string()),
    ));
    stats.warn("Narration word count 12 outside expected range 100..=1500");
    stats.set_synthesized_prompts(1);
    stats.set_counts(2, 2, 2, 12);
    ProcessingResult::new(
        story,
        characters,
        scenes,
        "Once there was a keeper.".to_string(),
        prompts,
        stats,
    )
}

fn engine() -> anyhow::Result<TemplateEngine> {
    let config = RackhamConfig::bundled()?;
    let at = Local
        .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous timestamp"))?;
    Ok(TemplateEngine::new(config.layout.outputs).with_timestamp(at))
}

#[test]
fn test_six_files_in_output_order() -> anyhow::Result<()> {
    let files = engine()?.render_all(&sample(), Duration::from_millis(1500));
    let names: Vec<_> = files.iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec![
            "1-Story.txt",
            "2-Narration.txt",
            "3-Character-Sheet.txt",
            "4-Scenes.txt",
            "5-Image-Prompts.txt",
            "processing-report.txt",
        ]
    );
    Ok(())
}

#[test]
fn test_story_file_heading_and_footer() -> anyhow::Result<()> {
    let story = engine()?.story(&sample());
    assert!(story.starts_with("STORY: The Lantern Keeper\n-------------------------\n\n"));
    assert!(story.contains("Generated: 2024-05-01 09:30:00"));
    assert!(story.contains("Wren kept the lantern lit"));
    Ok(())
}

#[test]
fn test_character_sheet_marks_missing_attributes() -> anyhow::Result<()> {
    let sheet = engine()?.character_sheet(&sample());
    assert!(sheet.contains("Total Characters: 2"));
    assert!(sheet.contains("CHARACTER 1: Wren\n=================\n\nRole: protagonist"));
    assert!(sheet.contains("CHARACTER 2: Bramble"));
    assert!(sheet.contains("Personality: Not specified"));
    assert!(sheet.contains("No description available"));
    Ok(())
}

#[test]
fn test_scene_breakdown_infers_visuals() -> anyhow::Result<()> {
    let scenes = engine()?.scenes(&sample());
    assert!(scenes.contains("- Lighting: Low-key, mysterious, shadow play"));
    assert!(scenes.contains("- Composition: Dynamic, diagonal lines, sense of movement"));
    assert!(scenes.contains("SCENE 2: Morning"));
    assert!(scenes.contains("Emotional Arc: Neutral"));
    Ok(())
}

#[test]
fn test_image_prompts_list_key_elements() -> anyhow::Result<()> {
    let prompts = engine()?.image_prompts(&sample());
    assert!(prompts.contains("Total Prompts: 2"));
    assert!(prompts.contains("Scene Context: Waves crash below."));
    assert!(prompts.contains("Emotional Tone: Scary"));
    assert!(prompts.contains("KEY ELEMENTS TO INCLUDE:\n- Glowing\n- Huge\n"));
    assert!(prompts.contains("- Magical story elements"));
    assert!(prompts.contains("- Lighting: pleasant lighting, well-lit, clear"));
    Ok(())
}

#[test]
fn test_report_shows_provenance_and_warnings() -> anyhow::Result<()> {
    let report = engine()?.report(&sample(), Duration::from_millis(1500));
    assert!(report.contains("Processing Time: 1.50 seconds"));
    assert!(report.contains("Processing Method: mixed"));
    assert!(report.contains("- characters: model\n- scenes: fallback (model unavailable)"));
    assert!(report.contains("Image Prompts Generated: 2 (1 synthesized)"));
    assert!(report.contains("- Narration word count 12 outside expected range"));
    assert!(report.contains("- Wren (protagonist)\n- Bramble (Unknown role)"));
    assert!(report.contains("6. processing-report.txt - This report"));
    Ok(())
}

#[test]
fn test_report_without_warnings() -> anyhow::Result<()> {
    let story = Story::new("Short", &TitleRule::default());
    let result = ProcessingResult::new(
        story,
        vec![],
        vec![],
        String::new(),
        vec![],
        ProcessingStats::default(),
    );
    let report = engine()?.report(&result, Duration::ZERO);
    assert!(report.contains("WARNINGS:\n---------\nNone\n"));
    assert!(report.contains("Processing Method: model"));
    Ok(())
}
