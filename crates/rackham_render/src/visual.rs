//! Visual direction inferred from scene emotion and action.

/// Lighting, palette, composition and camera suggestions for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneVisuals {
    /// Lighting suggestion
    pub lighting: &'static str,
    /// Colour palette suggestion
    pub palette: &'static str,
    /// Composition suggestion
    pub composition: &'static str,
    /// Camera angle suggestion
    pub camera: &'static str,
}

impl SceneVisuals {
    /// Infer visuals for a scene's emotion and key action.
    ///
    /// ```
    /// use rackham_render::SceneVisuals;
    ///
    /// let visuals = SceneVisuals::infer("Happy", "running through the meadow");
    /// assert_eq!(visuals.lighting, "Warm, bright, golden hour lighting");
    /// assert_eq!(visuals.composition, "Dynamic, diagonal lines, sense of movement");
    /// ```
    pub fn infer(emotion: &str, action: &str) -> Self {
        let (lighting, palette, camera) = match emotion.trim().to_lowercase().as_str() {
            "happy" | "joyful" => (
                "Warm, bright, golden hour lighting",
                "Warm yellows, bright blues, cheerful pastels",
                "Eye-level or slightly low angle for empowerment",
            ),
            "sad" => (
                "Soft, diffused, gentle lighting",
                "Cool blues, soft grays, muted tones",
                "Slightly high angle for vulnerability",
            ),
            "exciting" | "excited" => (
                "Dynamic, high-contrast, dramatic lighting",
                "Vibrant reds, oranges, high saturation",
                "Dynamic angles, Dutch tilt for energy",
            ),
            "scary" | "afraid" | "scared" => (
                "Low-key, mysterious, shadow play",
                "Dark purples, deep blues, desaturated",
                "Low angles for intimidation, high angles for vulnerability",
            ),
            "magical" => (
                "Ethereal, glowing, magical light sources",
                "Iridescent purples, sparkling golds, magical hues",
                "Eye-level with magical perspective",
            ),
            "peaceful" | "calm" => (
                "Soft, even, tranquil lighting",
                "Soft greens, gentle blues, earth tones",
                "Stable, eye-level, calming composition",
            ),
            "adventurous" | "brave" | "curious" => (
                "Natural, outdoor, sunlight through trees",
                "Rich greens, earthy browns, sky blues",
                "Varied angles, following action",
            ),
            _ => (
                "Appropriate emotional lighting",
                "Emotionally appropriate colors",
                "Appropriate emotional angle",
            ),
        };
        Self {
            lighting,
            palette,
            composition: composition_for(action),
            camera,
        }
    }
}

fn composition_for(action: &str) -> &'static str {
    let action = action.to_lowercase();
    let any = |words: &[&str]| words.iter().any(|w| action.contains(w));
    if any(&["run", "chase", "fast"]) {
        "Dynamic, diagonal lines, sense of movement"
    } else if any(&["talk", "discuss", "quiet"]) {
        "Balanced, rule of thirds, focused on characters"
    } else if any(&["discover", "find", "magic"]) {
        "Centered, leading lines, emphasis on discovery"
    } else {
        "Well-composed, visually balanced, story-focused"
    }
}

/// Prompt-sheet lighting, colours and composition for an emotion.
pub(crate) fn prompt_specs(emotion: &str) -> (&'static str, &'static str, &'static str) {
    match emotion.trim().to_lowercase().as_str() {
        "happy" | "joyful" => (
            "soft warm lighting, golden hour, cheerful atmosphere",
            "vibrant colors, warm palette, cheerful tones",
            "balanced composition, positive space, inviting",
        ),
        "sad" => (
            "gentle diffused light, overcast, melancholic mood",
            "muted colors, cool palette, soft tones",
            "asymmetrical composition, emotional weight",
        ),
        "exciting" | "excited" => (
            "dynamic lighting, high contrast, energetic",
            "saturated colors, bold palette, dynamic",
            "dynamic composition, leading lines, movement",
        ),
        "scary" | "afraid" | "scared" => (
            "dramatic shadows, moonlight, mysterious",
            "dark colors, desaturated, eerie tones",
            "unsettling composition, negative space",
        ),
        "magical" => (
            "ethereal glow, magical light, sparkling",
            "iridescent colors, magical hues, sparkling",
            "centered composition, magical focus",
        ),
        "peaceful" | "calm" => (
            "soft even light, tranquil, serene",
            "pastel colors, soft palette, calming",
            "harmonious composition, balanced, calm",
        ),
        "neutral" => (
            "pleasant lighting, well-lit, clear",
            "balanced colors, pleasant palette",
            "well-composed, visually pleasing",
        ),
        _ => (
            "beautiful lighting",
            "beautiful colors",
            "excellent composition",
        ),
    }
}

const KEY_INDICATORS: [&str; 5] = ["with", "featuring", "including", "showing", "containing"];
const MAX_KEY_ELEMENTS: usize = 5;

/// Words that follow "with", "featuring", "including", "showing" or
/// "containing" in a prompt, capitalised, at most five.
///
/// ```
/// use rackham_render::key_elements;
///
/// let elements = key_elements("A fox with lanterns, showing stars");
/// assert_eq!(elements, vec!["Lanterns", "Stars"]);
/// ```
pub fn key_elements(prompt: &str) -> Vec<String> {
    let words: Vec<String> = prompt
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
                .to_lowercase()
        })
        .collect();
    words
        .windows(2)
        .filter(|pair| KEY_INDICATORS.contains(&pair[0].as_str()) && !pair[1].is_empty())
        .map(|pair| capitalize(&pair[1]))
        .take(MAX_KEY_ELEMENTS)
        .collect()
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_emotion_gets_generic_visuals() {
        let visuals = SceneVisuals::infer("bewildered", "standing");
        assert_eq!(visuals.lighting, "Appropriate emotional lighting");
        assert_eq!(
            visuals.composition,
            "Well-composed, visually balanced, story-focused"
        );
    }

    #[test]
    fn key_elements_capped_at_five() {
        let prompt = "with a with b with c with d with e with f";
        assert_eq!(key_elements(prompt), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
