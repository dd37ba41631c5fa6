//! Story, framework texts and model responses shared by pipeline tests.

use rackham_config::{InputKey, LayoutConfig, RackhamConfig};

pub const STORY: &str = "The Lantern Keeper

On a windy hill there lived a girl named Wren who looked after the old lantern. \
Every night Wren climbed the tower steps and lit the flame for the fishing boats. \
One stormy evening a small fox called Bramble knocked at the door, shivering and lost. \
Together Wren and Bramble kept the light burning until every boat was safely home.";

pub const CHARACTERS_RESPONSE: &str = "Here are the characters:

Name: Wren
Role: protagonist
Personality: brave, patient
Appearance: small girl in a yellow raincoat
Motivation: keep the boats safe
Emotional Traits: determined, warm
Description: The lantern keeper of the hill.

Name: Bramble
Role: supporting
Personality: curious, loyal
Appearance: red fox with a white-tipped tail
Motivation: find somewhere warm
Emotional Traits: nervous, grateful
Description: A lost fox who becomes Wren's friend.
";

pub const SCENE_TITLES: [&str; 5] = [
    "The Windy Hill",
    "Climbing the Tower",
    "A Knock at the Door",
    "Keeping the Light",
    "Boats Come Home",
];

/// Fully populated scene blocks, one per title.
pub fn scenes_response(titles: &[&str]) -> String {
    titles
        .iter()
        .map(|title| {
            format!(
                "Title: {title}\nLocation: the lighthouse hill\nEmotion: hopeful\n\
                 Characters: Wren, Bramble\nAction: Wren tends the lantern\n\
                 Description: {title} in the glow of the lantern."
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A narration block of roughly `words` words after the marker line.
pub fn narration_response(words: usize) -> String {
    let body = std::iter::repeat("lantern")
        .take(words)
        .collect::<Vec<_>>()
        .join(" ");
    format!("Here is your narration.\nNarration: {body}")
}

/// One heading block per scene title.
pub fn prompts_response(titles: &[&str]) -> String {
    titles
        .iter()
        .map(|title| {
            format!("Prompt for {title}:\nA glowing lighthouse at night,\nsoft watercolor style")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Every input path with placeholder-bearing text, the story included.
pub fn input_files(layout: &LayoutConfig) -> Vec<(String, &'static str)> {
    layout
        .inputs()
        .into_iter()
        .map(|(key, path)| {
            let text = match key {
                InputKey::Story => STORY,
                InputKey::CharacterQueries => "List characters in {title}:\n{story_text}\n{character_template}",
                InputKey::SceneQueries => "Scenes for:\n{story_text}\nCast:\n{characters}\n{scene_template}",
                InputKey::NarrationQueries => "Narrate:\n{story_text}\n{characters}\n{scenes}\n{visual_style}",
                InputKey::PromptQueries => "Prompts:\n{scenes}\n{characters}\n{visual_rules}\n{unknown}",
                InputKey::NarrationTemplate => "Warm and gentle.",
                InputKey::CharacterTemplate => "Name: / Role: / ...",
                InputKey::SceneTemplate => "Title: / Location: / ...",
                InputKey::VisualRules => "Soft watercolor, rounded shapes.",
            };
            (path, text)
        })
        .collect()
}

pub fn config() -> RackhamConfig {
    RackhamConfig::bundled().expect("bundled config")
}
