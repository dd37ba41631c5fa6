//! Input and output file layout.

use serde::{Deserialize, Serialize};

/// Logical keys of the texts a run reads.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum InputKey {
    /// The story itself
    #[display("story")]
    Story,
    /// Character extraction query template
    #[display("character_queries")]
    CharacterQueries,
    /// Scene breakdown query template
    #[display("scene_queries")]
    SceneQueries,
    /// Narration query template
    #[display("narration_queries")]
    NarrationQueries,
    /// Image prompt query template
    #[display("prompt_queries")]
    PromptQueries,
    /// Narration framework template
    #[display("narration_template")]
    NarrationTemplate,
    /// Character framework template
    #[display("character_template")]
    CharacterTemplate,
    /// Scene framework template
    #[display("scene_template")]
    SceneTemplate,
    /// Visual style guide
    #[display("visual_rules")]
    VisualRules,
}

/// Names of the six rendered artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputNames {
    /// Story copy
    pub story: String,
    /// Narration script
    pub narration: String,
    /// Character sheet
    pub character_sheet: String,
    /// Scene breakdown
    pub scenes: String,
    /// Image prompt sheet
    pub image_prompts: String,
    /// Processing report
    pub report: String,
}

/// Folder and file names, relative to the store root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Folder holding every input
    pub input_folder: String,
    /// Folder receiving one subfolder per run
    pub output_folder: String,
    /// Subfolder of query templates
    pub queries_folder: String,
    /// Subfolder of framework templates
    pub templates_folder: String,
    /// Subfolder of style guides
    pub style_folder: String,
    /// Story file
    pub story: String,
    /// Character query template file
    pub character_queries: String,
    /// Scene query template file
    pub scene_queries: String,
    /// Narration query template file
    pub narration_queries: String,
    /// Image prompt query template file
    pub prompt_queries: String,
    /// Narration framework template file
    pub narration_template: String,
    /// Character framework template file
    pub character_template: String,
    /// Scene framework template file
    pub scene_template: String,
    /// Visual rules file
    pub visual_rules: String,
    /// Rendered artifact names
    pub outputs: OutputNames,
}

impl LayoutConfig {
    /// Store path of an input, e.g. `(in)/ai_queries/scene_queries.txt`.
    pub fn path_of(&self, key: InputKey) -> String {
        let (folder, file) = match key {
            InputKey::Story => (None, &self.story),
            InputKey::CharacterQueries => (Some(&self.queries_folder), &self.character_queries),
            InputKey::SceneQueries => (Some(&self.queries_folder), &self.scene_queries),
            InputKey::NarrationQueries => (Some(&self.queries_folder), &self.narration_queries),
            InputKey::PromptQueries => (Some(&self.queries_folder), &self.prompt_queries),
            InputKey::NarrationTemplate => {
                (Some(&self.templates_folder), &self.narration_template)
            }
            InputKey::CharacterTemplate => {
                (Some(&self.templates_folder), &self.character_template)
            }
            InputKey::SceneTemplate => (Some(&self.templates_folder), &self.scene_template),
            InputKey::VisualRules => (Some(&self.style_folder), &self.visual_rules),
        };
        match folder {
            Some(folder) => format!("{}/{}/{}", self.input_folder, folder, file),
            None => format!("{}/{}", self.input_folder, file),
        }
    }

    /// Every input in load order.
    pub fn inputs(&self) -> Vec<(InputKey, String)> {
        use strum::IntoEnumIterator;
        InputKey::iter().map(|k| (k, self.path_of(k))).collect()
    }

    pub(crate) fn check(&self) -> Result<(), String> {
        let names = [
            ("layout.input_folder", &self.input_folder),
            ("layout.output_folder", &self.output_folder),
            ("layout.story", &self.story),
            ("layout.outputs.story", &self.outputs.story),
            ("layout.outputs.report", &self.outputs.report),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(format!("{key} must not be empty"));
            }
        }
        if self.input_folder == self.output_folder {
            return Err("layout.input_folder and layout.output_folder must differ".to_string());
        }
        Ok(())
    }
}
