//! Top-level configuration and loading.

use crate::{
    EntityRules, ImagePromptRules, LayoutConfig, ModelConfig, NarrationRules, RetryConfig,
    StoryRules,
};
use config::{Config, File, FileFormat};
use rackham_core::{CharacterField, SceneField};
use rackham_error::{ConfigError, RackhamError, RackhamResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../rackham.toml");

/// Complete Rackham configuration.
///
/// # Example
///
/// ```toml
/// [scenes]
/// min = 3
/// max = 6
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RackhamConfig {
    /// Model service connection
    pub model: ModelConfig,
    /// Retry and backoff
    pub retry: RetryConfig,
    /// Story bounds and title rule
    pub story: StoryRules,
    /// Character extraction rules
    pub characters: EntityRules<CharacterField>,
    /// Scene extraction rules
    pub scenes: EntityRules<SceneField>,
    /// Narration rules
    pub narration: NarrationRules,
    /// Image prompt rules
    pub image_prompts: ImagePromptRules,
    /// Input and output layout
    pub layout: LayoutConfig,
}

impl RackhamConfig {
    /// The bundled defaults alone, ignoring any user files.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file fails to parse or validate.
    #[instrument]
    pub fn bundled() -> RackhamResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if absent.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rackham_config::RackhamConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = RackhamConfig::load()?;
    /// println!("scenes: {}..={}", config.scenes.min, config.scenes.max);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> RackhamResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/rackham/rackham.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("rackham").required(false));

        Self::build(builder)
    }

    /// Load a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> RackhamResult<Self> {
        debug!("Loading configuration from file");

        if !path.as_ref().exists() {
            return Err(ConfigError::new(format!(
                "Configuration file not found: {}",
                path.as_ref().display()
            ))
            .into());
        }

        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> RackhamResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                RackhamError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                RackhamError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every range and marker table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending key.
    pub fn validate(&self) -> RackhamResult<()> {
        self.check().map_err(|message| {
            tracing::error!(%message, "Invalid configuration");
            RackhamError::from(ConfigError::new(message))
        })
    }

    fn check(&self) -> Result<(), String> {
        if self.retry.max_attempts == 0 {
            return Err("retry.max_attempts must be at least 1".to_string());
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(format!(
                "model.temperature must be within 0.0..=2.0, got {}",
                self.model.temperature
            ));
        }
        if self.model.timeout_secs == 0 {
            return Err("model.timeout_secs must be at least 1".to_string());
        }
        if self.model.api_key_env.trim().is_empty() {
            return Err("model.api_key_env must name an environment variable".to_string());
        }
        if self.story.min_length > self.story.max_length {
            return Err(format!(
                "story.min_length ({}) exceeds story.max_length ({})",
                self.story.min_length, self.story.max_length
            ));
        }
        self.characters.check("characters")?;
        self.scenes.check("scenes")?;
        if self.narration.min_words > self.narration.max_words {
            return Err(format!(
                "narration.min_words ({}) exceeds narration.max_words ({})",
                self.narration.min_words, self.narration.max_words
            ));
        }
        if self.image_prompts.heading_marker.trim().is_empty() {
            return Err("image_prompts.heading_marker must not be empty".to_string());
        }
        self.layout.check()
    }
}
