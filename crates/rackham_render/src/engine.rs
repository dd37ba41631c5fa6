//! Artifact templates.

use crate::visual::{SceneVisuals, capitalize, key_elements, prompt_specs};
use chrono::{DateTime, Local};
use derive_getters::Getters;
use rackham_config::OutputNames;
use rackham_core::{ProcessingResult, Scene};
use std::time::Duration;
use tracing::{debug, instrument};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SECTION_RULE: &str = "##################################################";

const DEFAULT_KEY_ELEMENTS: [&str; 5] = [
    "Magical story elements",
    "Character emotions",
    "Story setting",
    "Key actions",
    "Atmospheric details",
];

/// One rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RenderedFile {
    /// File name inside the output folder
    name: String,
    /// Full text
    content: String,
}

impl RenderedFile {
    /// A named artifact.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Formats a processing result into the output artifacts.
///
/// The engine only presents what the pipeline decided. It never adds,
/// drops or reorders entities.
///
/// # Examples
///
/// ```
/// use rackham_config::RackhamConfig;
/// use rackham_core::{ProcessingResult, ProcessingStats, Story, TitleRule};
/// use rackham_render::TemplateEngine;
/// use std::time::Duration;
///
/// let config = RackhamConfig::bundled().unwrap();
/// let story = Story::new("The Fox\nA fox went out.", &TitleRule::default());
/// let result = ProcessingResult::new(story, vec![], vec![], String::new(), vec![], ProcessingStats::default());
///
/// let files = TemplateEngine::new(config.layout.outputs.clone()).render_all(&result, Duration::from_secs(1));
/// assert_eq!(files.len(), 6);
/// assert_eq!(files[0].name(), "1-Story.txt");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    outputs: OutputNames,
    generated_at: DateTime<Local>,
}

impl TemplateEngine {
    /// Create an engine stamped with the current local time.
    pub fn new(outputs: OutputNames) -> Self {
        Self {
            outputs,
            generated_at: Local::now(),
        }
    }

    /// Use a fixed generation timestamp.
    pub fn with_timestamp(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Render all six artifacts in output order.
    #[instrument(skip_all, fields(title = result.title()))]
    pub fn render_all(&self, result: &ProcessingResult, elapsed: Duration) -> Vec<RenderedFile> {
        let files = vec![
            RenderedFile::new(&self.outputs.story, self.story(result)),
            RenderedFile::new(&self.outputs.narration, self.narration(result)),
            RenderedFile::new(&self.outputs.character_sheet, self.character_sheet(result)),
            RenderedFile::new(&self.outputs.scenes, self.scenes(result)),
            RenderedFile::new(&self.outputs.image_prompts, self.image_prompts(result)),
            RenderedFile::new(&self.outputs.report, self.report(result, elapsed)),
        ];
        debug!(files = files.len(), "Rendered artifacts");
        files
    }

    /// The original story with a heading and footer.
    pub fn story(&self, result: &ProcessingResult) -> String {
        let title = result.title();
        format!(
            "{heading}\n\n{text}\n\n---\nGenerated: {at}\nStory Title: {title}\n",
            heading = heading(&format!("STORY: {title}"), '-'),
            text = result.story().text().trim(),
            at = self.timestamp(),
        )
    }

    /// The narration script with cast and scene lists.
    pub fn narration(&self, result: &ProcessingResult) -> String {
        let cast = list(result.characters().iter().map(|c| {
            format!(
                "- {}: {}",
                c.name(),
                c.role().as_deref().unwrap_or("Unknown role")
            )
        }));
        let scenes = list(result.scenes().iter().map(|s| format!("- {}", s.title())));
        format!(
            "{heading}\n\nCHARACTERS:\n{cast}\n\nSCENES:\n{scenes}\n\nNARRATION:\n{narration}\n\n\
             ---\nNarration Style: Warm, engaging, child-friendly\n\
             Target Audience: 4-6 year olds\n\
             Tone: Magical, reassuring, adventurous\n",
            heading = heading(&format!("NARRATION SCRIPT: {}", result.title()), '-'),
            narration = result.narration(),
        )
    }

    /// One profile section per character.
    pub fn character_sheet(&self, result: &ProcessingResult) -> String {
        let sections = result
            .characters()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                format!(
                    "{heading}\n\nRole: {}\nPersonality: {}\nAppearance: {}\nMotivation: {}\n\
                     Emotional Traits: {}\n\nDescription:\n{}\n",
                    or_unspecified(c.role()),
                    or_unspecified(c.personality()),
                    or_unspecified(c.appearance()),
                    or_unspecified(c.motivation()),
                    or_unspecified(c.emotional_traits()),
                    c.description()
                        .as_deref()
                        .unwrap_or("No description available"),
                    heading = heading(&format!("CHARACTER {}: {}", i + 1, c.name()), '='),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{heading}\n\nTotal Characters: {count}\n\n{SECTION_RULE}\n\n{sections}\n---\n\
             Character Consistency: Maintained across all scenes\n\
             Visual References: Consistent with style guide\n",
            heading = heading(&format!("CHARACTER SHEETS: {}", result.title()), '-'),
            count = result.characters().len(),
        )
    }

    /// One breakdown section per scene, with inferred visual direction.
    pub fn scenes(&self, result: &ProcessingResult) -> String {
        let sections = result
            .scenes()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let emotion = s.emotion().as_deref().unwrap_or("Neutral");
                let action = s.action().as_deref().unwrap_or("Not specified");
                let visuals = SceneVisuals::infer(emotion, action);
                format!(
                    "{heading}\n\nLocation: {}\nEmotional Arc: {emotion}\nCharacters Present: {}\n\
                     Key Action: {action}\n\nDescription:\n{}\n\nVISUAL ELEMENTS:\n\
                     - Lighting: {}\n- Color Palette: {}\n- Composition: {}\n- Camera Angle: {}\n",
                    or_unspecified(s.location()),
                    or_unspecified(s.characters()),
                    s.description()
                        .as_deref()
                        .unwrap_or("No description available"),
                    visuals.lighting,
                    visuals.palette,
                    visuals.composition,
                    visuals.camera,
                    heading = heading(&format!("SCENE {}: {}", i + 1, s.title()), '='),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{heading}\n\nTotal Scenes: {count}\n\n{SECTION_RULE}\n\n{sections}\n---\n\
             Scene Transitions: Follow story order\n",
            heading = heading(&format!("SCENE BREAKDOWN: {}", result.title()), '-'),
            count = result.scenes().len(),
        )
    }

    /// One section per image prompt, with technical specifications.
    pub fn image_prompts(&self, result: &ProcessingResult) -> String {
        let sections = result
            .image_prompts()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let scene = find_scene(result.scenes(), p.scene());
                let context = scene
                    .and_then(|s| s.description().as_deref())
                    .unwrap_or("Story scene");
                let emotion = scene
                    .and_then(|s| s.emotion().as_deref())
                    .unwrap_or("neutral");
                let (lighting, colors, composition) = prompt_specs(emotion);
                let mut elements = key_elements(p.prompt());
                if elements.is_empty() {
                    elements = DEFAULT_KEY_ELEMENTS.iter().map(|e| e.to_string()).collect();
                }
                format!(
                    "{heading}\n\nScene Context: {context}\nEmotional Tone: {tone}\n\n\
                     AI PROMPT:\n{prompt}\n\nTECHNICAL SPECIFICATIONS:\n\
                     - Style: Children's storybook illustration\n- Lighting: {lighting}\n\
                     - Colors: {colors}\n- Composition: {composition}\n\
                     - Details: High detail, magical elements, child-friendly\n\n\
                     KEY ELEMENTS TO INCLUDE:\n{elements}\n",
                    heading = heading(&format!("IMAGE PROMPT {}: {}", i + 1, p.scene()), '='),
                    tone = capitalize(emotion),
                    prompt = p.prompt(),
                    elements = list(elements.iter().map(|e| format!("- {e}"))),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{heading}\n\nTotal Prompts: {count}\n\
             Usage: For AI image generation (16:9 aspect ratio)\n\n{SECTION_RULE}\n\n{sections}",
            heading = heading(&format!("IMAGE GENERATION PROMPTS: {}", result.title()), '-'),
            count = result.image_prompts().len(),
        )
    }

    /// Counts, per-stage provenance and warnings for the run.
    pub fn report(&self, result: &ProcessingResult, elapsed: Duration) -> String {
        let stats = result.stats();
        let stages = list(stats.stages().iter().map(|r| match r.note() {
            Some(note) => format!("- {}: {} ({note})", r.stage(), r.method()),
            None => format!("- {}: {}", r.stage(), r.method()),
        }));
        let cast = list(result.characters().iter().map(|c| {
            format!(
                "- {} ({})",
                c.name(),
                c.role().as_deref().unwrap_or("Unknown role")
            )
        }));
        let scenes = list(result.scenes().iter().map(|s| {
            format!(
                "- {} ({})",
                s.title(),
                s.emotion().as_deref().unwrap_or("Neutral")
            )
        }));
        let warnings = if stats.warnings().is_empty() {
            "None".to_string()
        } else {
            list(stats.warnings().iter().map(|w| format!("- {w}")))
        };
        let outputs = &self.outputs;
        let files = [
            (&outputs.story, "Original story content"),
            (&outputs.narration, "Narration script"),
            (&outputs.character_sheet, "Character profiles"),
            (&outputs.scenes, "Scene breakdowns"),
            (&outputs.image_prompts, "Image generation prompts"),
            (&outputs.report, "This report"),
        ];
        let files = list(
            files
                .iter()
                .enumerate()
                .map(|(i, (name, what))| format!("{}. {name} - {what}", i + 1)),
        );

        format!(
            "{heading}\n\n\
             PROCESSING SUMMARY:\n-------------------\n\
             Timestamp: {at}\nProcessing Time: {secs:.2} seconds\nStatus: COMPLETED\n\
             Processing Method: {method}\n\n\
             CONTENT STATISTICS:\n-------------------\n\
             Characters Extracted: {characters}\nScenes Identified: {scene_count}\n\
             Image Prompts Generated: {prompts} ({synthesized} synthesized)\n\
             Narration Words: {words}\n\n\
             STAGES:\n-------\n{stages}\n\n\
             CHARACTERS PROCESSED:\n---------------------\n{cast}\n\n\
             SCENES GENERATED:\n-----------------\n{scenes}\n\n\
             WARNINGS:\n---------\n{warnings}\n\n\
             OUTPUT FILES:\n-------------\n{files}\n",
            heading = heading(&format!("PROCESSING REPORT: {}", result.title()), '='),
            at = self.timestamp(),
            secs = elapsed.as_secs_f64(),
            method = stats.method(),
            characters = stats.character_count(),
            scene_count = stats.scene_count(),
            prompts = stats.image_prompt_count(),
            synthesized = stats.synthesized_prompts(),
            words = stats.narration_words(),
        )
    }

    fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Heading line underlined to its own width.
fn heading(text: &str, rule: char) -> String {
    let underline: String = std::iter::repeat_n(rule, text.chars().count()).collect();
    format!("{text}\n{underline}")
}

fn list(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

fn or_unspecified(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Not specified")
}

fn find_scene<'a>(scenes: &'a [Scene], title: &str) -> Option<&'a Scene> {
    scenes.iter().find(|s| s.title() == title)
}
