//! Stage query assembly.

use crate::{Framework, PrefixMarkers};
use rackham_config::{InputKey, RackhamConfig};
use rackham_core::{Character, Entity, Scene};
use rackham_error::{PipelineError, PipelineErrorKind, RackhamResult};
use regex::{Captures, Regex};

/// Fills the `{placeholder}` slots of the query templates.
///
/// Substitution is a single pass: text inserted for one placeholder is never
/// scanned again, and unknown placeholders are left as written.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    placeholder: Regex,
}

impl QueryBuilder {
    /// Create a query builder.
    pub fn new() -> RackhamResult<Self> {
        let placeholder = Regex::new(r"\{([a-z_]+)\}").map_err(|e| {
            PipelineError::new(PipelineErrorKind::Template(format!(
                "Invalid placeholder pattern: {}",
                e
            )))
        })?;
        Ok(Self { placeholder })
    }

    /// Replace `{key}` with its value for every listed key.
    pub fn fill(&self, template: &str, values: &[(&str, &str)]) -> String {
        self.placeholder
            .replace_all(template, |caps: &Captures| {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                let key = caps.get(1).map_or("", |m| m.as_str());
                values
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map_or_else(|| whole.to_string(), |(_, value)| value.to_string())
            })
            .into_owned()
    }

    /// Character extraction query.
    pub fn characters(&self, framework: &Framework) -> String {
        let story = framework.story();
        self.fill(
            framework.text(InputKey::CharacterQueries),
            &[
                ("story_text", story.text()),
                ("title", story.title()),
                ("character_template", framework.text(InputKey::CharacterTemplate)),
            ],
        )
    }

    /// Scene breakdown query, given the accepted characters.
    pub fn scenes(&self, framework: &Framework, characters: &[Character]) -> String {
        let story = framework.story();
        let character_summary = character_summary(characters);
        self.fill(
            framework.text(InputKey::SceneQueries),
            &[
                ("story_text", story.text()),
                ("title", story.title()),
                ("characters", &character_summary),
                ("scene_template", framework.text(InputKey::SceneTemplate)),
            ],
        )
    }

    /// Narration query, given the accepted characters and scenes.
    pub fn narration(
        &self,
        framework: &Framework,
        characters: &[Character],
        scenes: &[Scene],
    ) -> String {
        let story = framework.story();
        let character_summary = character_summary(characters);
        let scene_summary = scene_summary(scenes);
        let visual_rules = framework.text(InputKey::VisualRules);
        self.fill(
            framework.text(InputKey::NarrationQueries),
            &[
                ("story_text", story.text()),
                ("title", story.title()),
                ("characters", &character_summary),
                ("scenes", &scene_summary),
                ("visual_style", visual_rules),
                ("visual_rules", visual_rules),
                ("narration_template", framework.text(InputKey::NarrationTemplate)),
            ],
        )
    }

    /// Image prompt query, given the full scene and character data.
    ///
    /// Entities are written in the same labelled-block format the earlier
    /// stages parsed them from.
    pub fn image_prompts(
        &self,
        framework: &Framework,
        config: &RackhamConfig,
        characters: &[Character],
        scenes: &[Scene],
    ) -> String {
        let character_blocks = PrefixMarkers::from(config.characters.markers.as_slice())
            .write_records(&characters.iter().map(Entity::to_record).collect::<Vec<_>>());
        let scene_blocks = PrefixMarkers::from(config.scenes.markers.as_slice())
            .write_records(&scenes.iter().map(Entity::to_record).collect::<Vec<_>>());
        let visual_rules = framework.text(InputKey::VisualRules);
        self.fill(
            framework.text(InputKey::PromptQueries),
            &[
                ("title", framework.story().title()),
                ("characters", &character_blocks),
                ("scenes", &scene_blocks),
                ("visual_style", visual_rules),
                ("visual_rules", visual_rules),
            ],
        )
    }
}

/// `- name: role` per character.
pub(crate) fn character_summary(characters: &[Character]) -> String {
    characters
        .iter()
        .map(Character::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- title: emotion at location` per scene.
pub(crate) fn scene_summary(scenes: &[Scene]) -> String {
    scenes
        .iter()
        .map(Scene::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_placeholders_survive() {
        let builder = QueryBuilder::new().unwrap();
        let filled = builder.fill("{a} and {b} and {A}", &[("a", "x")]);
        assert_eq!(filled, "x and {b} and {A}");
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let builder = QueryBuilder::new().unwrap();
        let filled = builder.fill("{story_text}", &[("story_text", "{title}"), ("title", "T")]);
        assert_eq!(filled, "{title}");
    }

    #[test]
    fn summaries_use_defaults() {
        let characters = vec![Character::new("Pip"), Character::new("Moss").with_role("guide")];
        assert_eq!(character_summary(&characters), "- Pip: character\n- Moss: guide");
        let scenes = vec![Scene::new("Storm")];
        assert_eq!(scene_summary(&scenes), "- Storm: neutral at unknown");
    }
}
