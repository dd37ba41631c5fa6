//! Deterministic offline content.

use rackham_config::RackhamConfig;
use rackham_core::{Character, ImagePrompt, Scene, Story, word_count};
use tracing::{debug, instrument};

const DEFAULT_CHARACTER_COUNT: usize = 2;
const EXCERPT_CHARS: usize = 200;

const STOP_WORDS: &[&str] = &[
    "and", "but", "the", "then", "when", "they", "she", "his", "her", "one", "once", "there",
    "this", "that", "what", "where", "who", "with", "you", "our", "mom", "dad", "mommy",
    "daddy", "grandma", "grandpa", "monday", "tuesday", "wednesday", "thursday", "friday",
    "saturday", "sunday",
];

struct CharacterTemplate {
    name: &'static str,
    role: &'static str,
    personality: &'static str,
    appearance: &'static str,
    motivation: &'static str,
    emotional_traits: &'static str,
    description: &'static str,
}

const HERO: CharacterTemplate = CharacterTemplate {
    name: "Adventure Hero",
    role: "protagonist",
    personality: "brave, curious, kind",
    appearance: "young adventurer with bright eyes and friendly smile",
    motivation: "to explore and discover new things",
    emotional_traits: "excited, courageous, hopeful",
    description: "The main character who goes on a wonderful adventure.",
};

const FRIEND: CharacterTemplate = CharacterTemplate {
    name: "Magical Friend",
    role: "supporting",
    personality: "helpful, magical, wise",
    appearance: "sparkling magical creature with gentle features",
    motivation: "to help and guide the hero",
    emotional_traits: "caring, patient, encouraging",
    description: "A magical friend who helps on the adventure.",
};

struct SceneTemplate {
    title: &'static str,
    location: &'static str,
    emotion: &'static str,
    action: &'static str,
    description: &'static str,
}

const SCENES: [SceneTemplate; 4] = [
    SceneTemplate {
        title: "The Beginning Adventure",
        location: "Magical Story World",
        emotion: "excited",
        action: "Starting the wonderful journey",
        description: "Where our adventure begins with excitement and curiosity.",
    },
    SceneTemplate {
        title: "Discovering New Places",
        location: "Enchanted Forest",
        emotion: "curious",
        action: "Exploring magical surroundings",
        description: "Discovering amazing new places and making wonderful finds.",
    },
    SceneTemplate {
        title: "Facing Challenges",
        location: "Mysterious Path",
        emotion: "brave",
        action: "Overcoming obstacles together",
        description: "Working together to solve problems and face challenges.",
    },
    SceneTemplate {
        title: "Happy Celebration",
        location: "Beautiful Meadow",
        emotion: "joyful",
        action: "Celebrating success",
        description: "A wonderful celebration of friendship and accomplishment.",
    },
];

const CLOSING: &[&str] = &[
    "What an incredible journey! Can you guess what wonderful things we discovered along the way?",
    "Remember, every story is a new adventure waiting to be explored. What was your favorite part?",
    "Let's imagine we're there right now - can you see the magical colors and hear the wonderful sounds?",
    "And they all lived happily ever after, exploring new adventures every day!",
];

const REFRAINS: &[&str] = &[
    "Let's turn the page together and see what happens next in our story.",
    "Every adventure is so much better with good friends right by our side.",
    "Close your eyes and imagine all the magical colors dancing around you.",
];

/// Builds count-valid content without the model service.
///
/// Output depends only on its inputs, so two runs over the same story
/// produce identical fallback content.
#[derive(Debug, Clone, Copy)]
pub struct FallbackSynthesizer<'a> {
    config: &'a RackhamConfig,
}

impl<'a> FallbackSynthesizer<'a> {
    /// Create a synthesizer honouring the configured count ranges.
    pub fn new(config: &'a RackhamConfig) -> Self {
        Self { config }
    }

    /// Two characters (clamped to the configured range).
    ///
    /// Names that recur capitalised mid-sentence in the story are used for
    /// the slots when there are any.
    #[instrument(skip_all)]
    pub fn characters(&self, story: &Story) -> Vec<Character> {
        let rules = &self.config.characters;
        let count = DEFAULT_CHARACTER_COUNT.max(rules.min).min(rules.max);
        let mut names = recurring_names(story.text()).into_iter();
        debug!(count, "Synthesizing characters");

        (0..count)
            .map(|slot| {
                let template = if slot == 0 { &HERO } else { &FRIEND };
                let name = names.next().unwrap_or_else(|| match slot {
                    0 | 1 => template.name.to_string(),
                    n => format!("Companion {}", n + 1),
                });
                Character::new(name)
                    .with_role(template.role)
                    .with_personality(template.personality)
                    .with_appearance(template.appearance)
                    .with_motivation(template.motivation)
                    .with_emotional_traits(template.emotional_traits)
                    .with_description(template.description)
            })
            .collect()
    }

    /// The four template scenes, padded or truncated to the configured range.
    #[instrument(skip_all)]
    pub fn scenes(&self, characters: &[Character]) -> Vec<Scene> {
        let rules = &self.config.scenes;
        let cast = lead_names(characters, ", ");

        let mut scenes: Vec<Scene> = SCENES
            .iter()
            .map(|t| {
                let scene = Scene::new(t.title)
                    .with_location(t.location)
                    .with_emotion(t.emotion)
                    .with_action(t.action)
                    .with_description(t.description);
                match &cast {
                    Some(cast) => scene.with_characters(cast.as_str()),
                    None => scene,
                }
            })
            .collect();

        while scenes.len() < rules.min {
            let n = scenes.len() + 1;
            let scene = Scene::new(format!("Chapter {n}"))
                .with_location("Magical Story World")
                .with_emotion("hopeful")
                .with_action("Continuing the journey")
                .with_description("The adventure continues with new surprises around every corner.");
            scenes.push(match &cast {
                Some(cast) => scene.with_characters(cast.as_str()),
                None => scene,
            });
        }
        scenes.truncate(rules.max);
        debug!(count = scenes.len(), "Synthesized scenes");
        scenes
    }

    /// Template narration fitted to the configured word range.
    #[instrument(skip_all)]
    pub fn narration(&self, story: &Story, characters: &[Character], scenes: &[Scene]) -> String {
        let rules = &self.config.narration;
        let cast = lead_names(characters, " and ").unwrap_or_else(|| "our new friends".to_string());
        let excerpt: String = story.text().trim().chars().take(EXCERPT_CHARS).collect();

        let mut paragraphs = vec![
            format!(
                "Welcome to our magical story time! Today we're going on an amazing adventure with {cast}."
            ),
            format!("{excerpt}..."),
        ];
        paragraphs.extend(scenes.iter().map(|scene| {
            format!(
                "{}. {}",
                scene.title(),
                scene
                    .description()
                    .as_deref()
                    .unwrap_or("Something wonderful happens here.")
            )
        }));
        paragraphs.extend(CLOSING.iter().map(|line| line.to_string()));

        let mut refrains = REFRAINS.iter().cycle();
        while word_count(&paragraphs.join(" ")) < rules.min_words {
            match refrains.next() {
                Some(line) => paragraphs.push(line.to_string()),
                None => break,
            }
        }

        truncate_words(&paragraphs.join("\n\n"), rules.max_words)
    }

    /// One storybook prompt per scene, built from title and description.
    pub fn image_prompts(&self, scenes: &[Scene]) -> Vec<ImagePrompt> {
        scenes
            .iter()
            .map(|scene| {
                let description = scene.description().as_deref().unwrap_or(scene.title());
                ImagePrompt::new(
                    scene.title(),
                    format!(
                        "Children's storybook illustration of {}, {}, magical storybook style, warm lighting, soft pastel colors, detailed environments, 16:9 aspect ratio, child-friendly",
                        scene.title(),
                        description
                    ),
                )
            })
            .collect()
    }

    /// Short default prompt for a scene the model gave no prompt for.
    pub fn default_prompt(&self, scene: &Scene) -> ImagePrompt {
        ImagePrompt::new(
            scene.title(),
            format!(
                "Children's storybook illustration of {}, magical, colorful, warm lighting, storybook style",
                scene.title()
            ),
        )
    }
}

fn lead_names(characters: &[Character], separator: &str) -> Option<String> {
    let names: Vec<&str> = characters.iter().take(2).map(|c| c.name().as_str()).collect();
    (!names.is_empty()).then(|| names.join(separator))
}

/// Capitalised words that appear mid-sentence at least twice, in order of
/// first appearance.
fn recurring_names(text: &str) -> Vec<String> {
    let mut seen: Vec<(String, usize)> = Vec::new();
    let mut sentence_start = true;

    for raw in text.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let mid_sentence = !sentence_start;
        sentence_start = raw
            .trim_end_matches(['"', '\'', ')', '\u{201d}', '\u{2019}'])
            .ends_with(['.', '!', '?', ':']);

        let capitalised = word.chars().next().is_some_and(char::is_uppercase)
            && word.chars().skip(1).all(char::is_lowercase);
        if !mid_sentence
            || !capitalised
            || word.chars().count() < 3
            || STOP_WORDS.contains(&word.to_lowercase().as_str())
        {
            continue;
        }

        match seen.iter_mut().find(|(name, _)| name == word) {
            Some((_, count)) => *count += 1,
            None => seen.push((word.to_string(), 1)),
        }
    }

    seen.into_iter()
        .filter(|(_, count)| *count >= 2)
        .map(|(name, _)| name)
        .collect()
}

/// Keep the first `max` words, preserving line structure.
fn truncate_words(text: &str, max: usize) -> String {
    if word_count(text) <= max {
        return text.to_string();
    }
    let mut remaining = max;
    let mut lines = Vec::new();
    for line in text.lines() {
        if remaining == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().take(remaining).collect();
        remaining -= words.len();
        lines.push(words.join(" "));
    }
    lines.join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurring_names_need_two_mid_sentence_uses() {
        let text = "Once there was a fox. Then Pip met Moss. Later Pip and Moss sailed. Only Tom came once.";
        assert_eq!(recurring_names(text), vec!["Pip", "Moss"]);
    }

    #[test]
    fn sentence_openers_are_not_names() {
        let text = "Rain fell. Rain fell again. Rain always fell.";
        assert!(recurring_names(text).is_empty());
    }

    #[test]
    fn truncation_keeps_paragraphs() {
        let text = "one two three\n\nfour five six";
        assert_eq!(truncate_words(text, 4), "one two three\n\nfour");
        assert_eq!(truncate_words(text, 10), text);
    }
}
