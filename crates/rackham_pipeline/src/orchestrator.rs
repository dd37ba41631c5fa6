//! Four-stage pipeline driver.

use crate::{
    BlockParser, EntityValidator, FallbackSynthesizer, Framework, HeadingMarkers, ParseMode,
    PrefixMarkers, QueryBuilder, RejectionReason, StageOutcome, reconcile_prompts,
};
use rackham_config::{EntityRules, RackhamConfig};
use rackham_core::{
    Character, Entity, ImagePrompt, ProcessingMethod, ProcessingResult, ProcessingStats, Scene,
    Stage, StageReport, Story, word_count,
};
use rackham_error::{PipelineError, PipelineErrorKind, RackhamResult};
use rackham_interface::StoryDriver;
use rackham_models::ModelClient;
use rackham_storage::ContentStore;
use tracing::{error, info, instrument, warn};

/// Runs characters, scenes, narration and image prompts in order.
///
/// The model client and the store are injected once and shared by every
/// stage. Stages run sequentially because each one feeds the next. Only
/// the story input and store failures can abort a run: everything the
/// model gets wrong is replaced by fallback content and noted in
/// [`ProcessingStats`].
pub struct PipelineOrchestrator<D, S> {
    client: ModelClient<D>,
    store: S,
    config: RackhamConfig,
    queries: QueryBuilder,
}

impl<D: StoryDriver, S: ContentStore> PipelineOrchestrator<D, S> {
    /// Create an orchestrator.
    pub fn new(client: ModelClient<D>, store: S, config: RackhamConfig) -> RackhamResult<Self> {
        Ok(Self {
            client,
            store,
            config,
            queries: QueryBuilder::new()?,
        })
    }

    /// The shared model client.
    pub fn client(&self) -> &ModelClient<D> {
        &self.client
    }

    /// The shared store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The configuration in use.
    pub fn config(&self) -> &RackhamConfig {
        &self.config
    }

    /// Read the story and framework texts from the store.
    pub async fn load_framework(&self) -> RackhamResult<Framework> {
        Framework::load(&self.store, &self.config.layout, &self.config.story).await
    }

    /// Load inputs and process the story.
    pub async fn run(&self) -> RackhamResult<ProcessingResult> {
        let framework = self.load_framework().await?;
        self.process(&framework).await
    }

    /// Process an already loaded framework.
    ///
    /// Fails only when the story is outside the configured length range.
    #[instrument(skip_all, fields(title = %framework.story().title(), online = self.client.is_available()))]
    pub async fn process(&self, framework: &Framework) -> RackhamResult<ProcessingResult> {
        let story = framework.story();
        self.validate_story(story)?;
        info!(length = story.trimmed_len(), "Processing story");

        let fallback = FallbackSynthesizer::new(&self.config);
        let mut stats = ProcessingStats::default();

        let characters = self.characters(framework, &fallback, &mut stats).await;
        let scenes = self
            .scenes(framework, &characters, &fallback, &mut stats)
            .await;
        let narration = self
            .narration(framework, &characters, &scenes, &fallback, &mut stats)
            .await;
        let image_prompts = self
            .image_prompts(framework, &characters, &scenes, &fallback, &mut stats)
            .await;

        self.check_result(&characters, &scenes, &narration, &image_prompts, &mut stats);
        stats.set_counts(
            characters.len(),
            scenes.len(),
            image_prompts.len(),
            word_count(&narration),
        );
        info!(
            characters = characters.len(),
            scenes = scenes.len(),
            image_prompts = image_prompts.len(),
            method = %stats.method(),
            "Story processed"
        );

        Ok(ProcessingResult::new(
            story.clone(),
            characters,
            scenes,
            narration,
            image_prompts,
            stats,
        ))
    }

    fn validate_story(&self, story: &Story) -> RackhamResult<()> {
        let rules = &self.config.story;
        let length = story.trimmed_len();
        if length < rules.min_length {
            error!(length, minimum = rules.min_length, "Story too short");
            return Err(PipelineError::new(PipelineErrorKind::StoryTooShort {
                length,
                minimum: rules.min_length,
            })
            .into());
        }
        if story.len() > rules.max_length {
            error!(length = story.len(), maximum = rules.max_length, "Story too long");
            return Err(PipelineError::new(PipelineErrorKind::StoryTooLong {
                length: story.len(),
                maximum: rules.max_length,
            })
            .into());
        }
        Ok(())
    }

    #[instrument(skip_all)]
    async fn characters(
        &self,
        framework: &Framework,
        fallback: &FallbackSynthesizer<'_>,
        stats: &mut ProcessingStats,
    ) -> Vec<Character> {
        let rules = &self.config.characters;
        let query = self.queries.characters(framework);
        let outcome = match self.ask(Stage::Characters, &query, &rules.role_hint).await {
            Ok(text) => extract_entities(&text, rules),
            Err(reason) => StageOutcome::Rejected(reason),
        };
        settle(Stage::Characters, outcome, stats, || {
            fallback.characters(framework.story())
        })
    }

    #[instrument(skip_all)]
    async fn scenes(
        &self,
        framework: &Framework,
        characters: &[Character],
        fallback: &FallbackSynthesizer<'_>,
        stats: &mut ProcessingStats,
    ) -> Vec<Scene> {
        let rules = &self.config.scenes;
        let query = self.queries.scenes(framework, characters);
        let outcome = match self.ask(Stage::Scenes, &query, &rules.role_hint).await {
            Ok(text) => extract_entities(&text, rules),
            Err(reason) => StageOutcome::Rejected(reason),
        };
        settle(Stage::Scenes, outcome, stats, || fallback.scenes(characters))
    }

    #[instrument(skip_all)]
    async fn narration(
        &self,
        framework: &Framework,
        characters: &[Character],
        scenes: &[Scene],
        fallback: &FallbackSynthesizer<'_>,
        stats: &mut ProcessingStats,
    ) -> String {
        let rules = &self.config.narration;
        let query = self.queries.narration(framework, characters, scenes);
        let outcome = match self.ask(Stage::Narration, &query, &rules.role_hint).await {
            Ok(text) => {
                let body = narration_body(&text, &rules.marker);
                if body.is_empty() {
                    StageOutcome::Rejected(RejectionReason::EmptyResponse)
                } else {
                    StageOutcome::Accepted(body)
                }
            }
            Err(reason) => StageOutcome::Rejected(reason),
        };
        settle(Stage::Narration, outcome, stats, || {
            fallback.narration(framework.story(), characters, scenes)
        })
    }

    #[instrument(skip_all, fields(scenes = scenes.len()))]
    async fn image_prompts(
        &self,
        framework: &Framework,
        characters: &[Character],
        scenes: &[Scene],
        fallback: &FallbackSynthesizer<'_>,
        stats: &mut ProcessingStats,
    ) -> Vec<ImagePrompt> {
        let rules = &self.config.image_prompts;
        let query = self
            .queries
            .image_prompts(framework, &self.config, characters, scenes);
        let outcome = match self.ask(Stage::ImagePrompts, &query, &rules.role_hint).await {
            Ok(text) => {
                let parser = BlockParser::new(
                    HeadingMarkers::new(&rules.heading_marker),
                    ParseMode::headed(" "),
                );
                let parsed: Vec<ImagePrompt> = parser
                    .parse(&text)
                    .iter()
                    .filter_map(ImagePrompt::from_record)
                    .filter(|p| !p.prompt().trim().is_empty())
                    .collect();
                if parsed.is_empty() {
                    StageOutcome::Rejected(RejectionReason::NoRecords)
                } else {
                    StageOutcome::Accepted(parsed)
                }
            }
            Err(reason) => StageOutcome::Rejected(reason),
        };

        let parsed = match outcome {
            StageOutcome::Accepted(parsed) => parsed,
            rejected => {
                let prompts = settle(Stage::ImagePrompts, rejected, stats, || {
                    fallback.image_prompts(scenes)
                });
                stats.set_synthesized_prompts(prompts.len());
                return prompts;
            }
        };

        let parsed_count = parsed.len();
        let reconciled = reconcile_prompts(parsed, scenes, |scene| fallback.default_prompt(scene));
        if reconciled.dropped > 0 {
            stats.warn(format!(
                "{} image prompts beyond the scene count were dropped",
                reconciled.dropped
            ));
        }
        stats.set_synthesized_prompts(reconciled.synthesized);

        let report = if reconciled.synthesized == 0 {
            info!(%parsed_count, "Image prompts accepted");
            StageReport::new(Stage::ImagePrompts, ProcessingMethod::Model, None)
        } else {
            warn!(
                parsed = parsed_count,
                synthesized = reconciled.synthesized,
                "Synthesized image prompts for unmatched scenes"
            );
            StageReport::new(
                Stage::ImagePrompts,
                ProcessingMethod::Mixed,
                Some(format!(
                    "{} of {} prompts synthesized for unmatched scenes",
                    reconciled.synthesized,
                    scenes.len()
                )),
            )
        };
        stats.record_stage(report);
        reconciled.prompts
    }

    /// Send one stage query, mapping every failure to a rejection reason.
    async fn ask(&self, stage: Stage, query: &str, role_hint: &str) -> Result<String, RejectionReason> {
        if !self.client.is_available() {
            return Err(RejectionReason::ModelUnavailable);
        }
        let hint = Some(role_hint).filter(|h| !h.trim().is_empty());
        match self.client.query(query, hint).await {
            Ok(Some(text)) if text.trim().is_empty() => Err(RejectionReason::EmptyResponse),
            Ok(Some(text)) => Ok(text),
            Ok(None) => Err(RejectionReason::NoResponse),
            Err(e) => {
                error!(%stage, error = %e, "Model failed permanently");
                Err(RejectionReason::ModelError(e.to_string()))
            }
        }
    }

    /// Log, but do not correct, counts outside their configured ranges.
    fn check_result(
        &self,
        characters: &[Character],
        scenes: &[Scene],
        narration: &str,
        image_prompts: &[ImagePrompt],
        stats: &mut ProcessingStats,
    ) {
        let config = &self.config;
        let words = word_count(narration);
        let checks = [
            (
                "Character",
                characters.len(),
                config.characters.min,
                config.characters.max,
            ),
            ("Scene", scenes.len(), config.scenes.min, config.scenes.max),
            (
                "Narration word",
                words,
                config.narration.min_words,
                config.narration.max_words,
            ),
        ];
        for (what, count, min, max) in checks {
            if !(min..=max).contains(&count) {
                warn!(count, min, max, "{} count outside expected range", what);
                stats.warn(format!(
                    "{what} count {count} outside expected range {min}..={max}"
                ));
            }
        }
        if image_prompts.len() != scenes.len() {
            warn!(
                image_prompts = image_prompts.len(),
                scenes = scenes.len(),
                "Image prompt count does not match scene count"
            );
            stats.warn(format!(
                "{} image prompts for {} scenes",
                image_prompts.len(),
                scenes.len()
            ));
        }
    }
}

impl<D, S> std::fmt::Debug for PipelineOrchestrator<D, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOrchestrator")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

fn extract_entities<T: Entity>(text: &str, rules: &EntityRules<T::Field>) -> StageOutcome<Vec<T>> {
    let parser = BlockParser::new(
        PrefixMarkers::from(rules.markers.as_slice()),
        ParseMode::blocks(),
    );
    let records = parser.parse(text);
    EntityValidator::new(rules).validate(&records)
}

fn settle<T>(
    stage: Stage,
    outcome: StageOutcome<T>,
    stats: &mut ProcessingStats,
    fallback: impl FnOnce() -> T,
) -> T {
    match outcome {
        StageOutcome::Accepted(value) => {
            info!(%stage, "Using model output");
            stats.record_stage(StageReport::new(stage, ProcessingMethod::Model, None));
            value
        }
        StageOutcome::Rejected(reason) => {
            warn!(%stage, %reason, "Using fallback content");
            stats.record_stage(StageReport::new(
                stage,
                ProcessingMethod::Fallback,
                Some(reason.to_string()),
            ));
            fallback()
        }
    }
}

/// Text after the narration marker line, or the whole response without one.
fn narration_body(text: &str, marker: &str) -> String {
    if !marker.is_empty() {
        let mut lines = text.lines();
        while let Some(line) = lines.next() {
            if let Some(rest) = line.trim_start().strip_prefix(marker) {
                let mut body = vec![rest.trim()];
                body.extend(lines.by_ref());
                return body.join("\n").trim().to_string();
            }
        }
    }
    text.trim().to_string()
}
