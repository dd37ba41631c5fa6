//! Story and framework texts read at the start of a run.

use rackham_config::{InputKey, LayoutConfig, StoryRules};
use rackham_core::Story;
use rackham_error::{PipelineError, PipelineErrorKind, RackhamResult};
use rackham_storage::ContentStore;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Everything a run reads from the store: the story plus the query
/// templates, framework templates and style guide that shape each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    story: Story,
    texts: BTreeMap<InputKey, String>,
}

impl Framework {
    /// Read every input named by the layout.
    ///
    /// The first missing input aborts the run with
    /// [`PipelineErrorKind::MissingInput`]. Store failures propagate as-is.
    #[instrument(skip_all)]
    pub async fn load<S: ContentStore + ?Sized>(
        store: &S,
        layout: &LayoutConfig,
        rules: &StoryRules,
    ) -> RackhamResult<Self> {
        let mut texts = BTreeMap::new();
        for (key, path) in layout.inputs() {
            let text = store.read_text(&path).await?.ok_or_else(|| {
                PipelineError::new(PipelineErrorKind::MissingInput(format!("{key} ({path})")))
            })?;
            debug!(%key, path, len = text.len(), "Loaded input");
            texts.insert(key, text);
        }

        let story_text = texts.remove(&InputKey::Story).unwrap_or_default();
        let story = Story::new(story_text, &rules.title_rule());
        info!(title = story.title(), inputs = texts.len() + 1, "Framework loaded");
        Ok(Self { story, texts })
    }

    /// Build a framework from texts already in memory.
    ///
    /// Keys absent from `texts` read as empty.
    pub fn from_texts(
        story_text: impl Into<String>,
        texts: impl IntoIterator<Item = (InputKey, String)>,
        rules: &StoryRules,
    ) -> Self {
        let mut texts: BTreeMap<_, _> = texts.into_iter().collect();
        texts.remove(&InputKey::Story);
        Self {
            story: Story::new(story_text, &rules.title_rule()),
            texts,
        }
    }

    /// The story.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Framework text for a key, empty if absent.
    pub fn text(&self, key: InputKey) -> &str {
        match key {
            InputKey::Story => self.story.text(),
            key => self.texts.get(&key).map_or("", String::as_str),
        }
    }
}
