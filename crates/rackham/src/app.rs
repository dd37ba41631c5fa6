//! End-to-end run: config, store, model client, pipeline, artifacts.

use crate::output::{output_folder_name, write_outputs};
use chrono::Local;
use derive_getters::Getters;
use rackham_config::{InputKey, LayoutConfig, RackhamConfig};
use rackham_core::ProcessingMethod;
use rackham_error::{ModelErrorKind, RackhamResult};
use rackham_models::{ModelClient, OpenAICompatibleClient, QuerySettings, RetryPolicy};
use rackham_pipeline::{Framework, PipelineOrchestrator};
use rackham_render::TemplateEngine;
use rackham_storage::{ContentStore, FileSystemStore};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// What to run and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Directory holding the input and output folders
    pub root: PathBuf,
    /// Config file replacing the layered lookup
    pub config: Option<PathBuf>,
    /// Skip the probe and use fallbacks for every stage
    pub offline: bool,
}

impl RunOptions {
    /// Options for a run rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: None,
            offline: false,
        }
    }

    /// Read configuration from this file only.
    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Force the model client offline.
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Getters)]
pub struct RunSummary {
    title: String,
    folder: String,
    files: Vec<String>,
    elapsed: Duration,
    method: ProcessingMethod,
}

/// One input the layout expects.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct InputStatus {
    key: InputKey,
    path: String,
    present: bool,
}

/// Load configuration from `path`, or through the layered lookup.
pub fn load_config(path: Option<&Path>) -> RackhamResult<RackhamConfig> {
    match path {
        Some(path) => RackhamConfig::from_file(path),
        None => RackhamConfig::load(),
    }
}

/// Build the model client for `config`.
///
/// A missing API key is not an error: the client starts offline and every
/// stage uses its fallback. With `offline` set the probe is skipped.
#[instrument(skip(config), fields(provider = %config.model.provider, model = %config.model.model))]
pub async fn connect_client(
    config: &RackhamConfig,
    offline: bool,
) -> RackhamResult<ModelClient<OpenAICompatibleClient>> {
    let policy = RetryPolicy::from(&config.retry);
    let settings = QuerySettings::from(&config.model);

    match OpenAICompatibleClient::from_config(&config.model) {
        Ok(driver) if offline => Ok(ModelClient::offline(driver, policy, settings)),
        Ok(driver) => Ok(ModelClient::connect(driver, policy, settings).await),
        Err(e) if matches!(e.kind, ModelErrorKind::MissingApiKey(_)) => {
            warn!(error = %e, "No API key configured, continuing offline");
            let driver = OpenAICompatibleClient::new(
                String::new(),
                &config.model.base_url,
                config.model.model.clone(),
                config.model.provider.clone(),
                config.model.timeout(),
            )?;
            Ok(ModelClient::offline(driver, policy, settings))
        }
        Err(e) => Err(e.into()),
    }
}

/// Report which inputs exist under the layout.
pub async fn check_inputs<S: ContentStore + ?Sized>(
    store: &S,
    layout: &LayoutConfig,
) -> RackhamResult<Vec<InputStatus>> {
    let mut statuses = Vec::new();
    for (key, path) in layout.inputs() {
        let present = store.exists(&path).await?;
        statuses.push(InputStatus { key, path, present });
    }
    Ok(statuses)
}

/// Create the input and output folder skeleton for a fresh root.
///
/// Folders that already exist are left alone. Returns the folders created.
#[instrument(skip_all)]
pub async fn init_layout<S: ContentStore + ?Sized>(
    store: &S,
    layout: &LayoutConfig,
) -> RackhamResult<Vec<String>> {
    let folders = [
        format!("{}/{}", layout.input_folder, layout.queries_folder),
        format!("{}/{}", layout.input_folder, layout.templates_folder),
        format!("{}/{}", layout.input_folder, layout.style_folder),
        layout.output_folder.clone(),
    ];

    let mut created = Vec::new();
    for folder in folders {
        if store.exists(&folder).await? {
            debug!(folder, "Folder already present");
            continue;
        }
        store.create_folder(&folder).await?;
        info!(folder, "Created folder");
        created.push(folder);
    }
    Ok(created)
}

/// Process the story under `options.root` and write its artifacts.
///
/// Inputs are read before the model is probed, so a missing input fails
/// without any network traffic.
///
/// # Errors
///
/// Fails on invalid configuration, a missing input, a story outside the
/// length limits, or a storage failure. Model failures never fail a run.
#[instrument(skip_all, fields(root = %options.root.display(), offline = options.offline))]
pub async fn run_story(options: &RunOptions) -> RackhamResult<RunSummary> {
    let started = Instant::now();
    let config = load_config(options.config.as_deref())?;
    let store = FileSystemStore::new(options.root.clone())?;
    let framework = Framework::load(&store, &config.layout, &config.story).await?;

    let client = connect_client(&config, options.offline).await?;
    let pipeline = PipelineOrchestrator::new(client, store, config)?;
    let result = pipeline.process(&framework).await?;

    let now = Local::now();
    let layout = &pipeline.config().layout;
    let files = TemplateEngine::new(layout.outputs.clone())
        .with_timestamp(now)
        .render_all(&result, started.elapsed());
    let folder = format!(
        "{}/{}",
        layout.output_folder,
        output_folder_name(result.title(), now)
    );
    let written = write_outputs(pipeline.store(), &folder, &files).await?;

    let summary = RunSummary {
        title: result.title().to_string(),
        folder,
        files: written,
        elapsed: started.elapsed(),
        method: result.stats().method(),
    };
    info!(
        title = %summary.title,
        folder = %summary.folder,
        method = %summary.method,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "Run complete"
    );
    Ok(summary)
}
