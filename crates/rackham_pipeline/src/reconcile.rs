//! Pairing parsed image prompts with scenes.

use rackham_core::{ImagePrompt, Scene};
use tracing::{debug, warn};

/// Exactly one prompt per scene, plus how it was achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptReconciliation {
    /// One prompt per scene, in scene order, each naming its scene's title
    pub prompts: Vec<ImagePrompt>,
    /// Prompts synthesized for scenes nothing was parsed for
    pub synthesized: usize,
    /// Parsed prompts with no scene left to take them
    pub dropped: usize,
}

/// Assign parsed prompts to scenes.
///
/// Passes, in order:
/// 1. a prompt whose scene reference equals a title, ignoring case and
///    punctuation, takes that scene
/// 2. a reference containing a title (or contained in it) takes that scene
/// 3. leftover prompts fill the remaining scenes in order
/// 4. scenes still without a prompt get `default(scene)`
///
/// Parsed prompts with no text are discarded first.
///
/// # Examples
///
/// ```
/// use rackham_core::{ImagePrompt, Scene};
/// use rackham_pipeline::reconcile_prompts;
///
/// let scenes = vec![Scene::new("The Storm"), Scene::new("Home Again")];
/// let parsed = vec![ImagePrompt::new("home again!", "a cozy kitchen")];
///
/// let result = reconcile_prompts(parsed, &scenes, |s| ImagePrompt::new(s.title(), "default"));
/// assert_eq!(result.prompts[1].prompt(), "a cozy kitchen");
/// assert_eq!(result.prompts[0].prompt(), "default");
/// assert_eq!(result.synthesized, 1);
/// ```
pub fn reconcile_prompts(
    parsed: Vec<ImagePrompt>,
    scenes: &[Scene],
    default: impl Fn(&Scene) -> ImagePrompt,
) -> PromptReconciliation {
    let mut pending: Vec<Option<ImagePrompt>> = parsed
        .into_iter()
        .filter(|p| !p.prompt().trim().is_empty())
        .map(Some)
        .collect();
    let titles: Vec<String> = scenes.iter().map(|s| normalize(s.title())).collect();
    let mut slots: Vec<Option<ImagePrompt>> = vec![None; scenes.len()];

    let exact = |reference: &str, title: &str| reference == title;
    let contains = |reference: &str, title: &str| {
        !reference.is_empty()
            && !title.is_empty()
            && (reference.contains(title) || title.contains(reference))
    };

    for rule in [&exact as &dyn Fn(&str, &str) -> bool, &contains] {
        for entry in pending.iter_mut() {
            let Some(prompt) = entry else { continue };
            let reference = normalize(prompt.scene());
            let slot = titles
                .iter()
                .zip(slots.iter())
                .position(|(title, slot)| slot.is_none() && rule(&reference, title));
            if let Some(index) = slot {
                debug!(scene = scenes[index].title(), "Matched prompt by title");
                slots[index] = entry.take();
            }
        }
    }

    let mut leftovers = pending.into_iter().flatten();
    for slot in slots.iter_mut().filter(|s| s.is_none()) {
        match leftovers.next() {
            Some(prompt) => *slot = Some(prompt),
            None => break,
        }
    }
    let dropped = leftovers.count();
    if dropped > 0 {
        warn!(dropped, "Dropping image prompts beyond the scene count");
    }

    let mut synthesized = 0;
    let prompts = slots
        .into_iter()
        .zip(scenes)
        .map(|(slot, scene)| match slot {
            Some(prompt) => prompt.for_scene(scene.title()),
            None => {
                synthesized += 1;
                default(scene)
            }
        })
        .collect();

    PromptReconciliation {
        prompts,
        synthesized,
        dropped,
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
