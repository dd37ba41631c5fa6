//! Availability-aware model client.

use crate::RetryPolicy;
use rackham_config::ModelConfig;
use rackham_core::{GenerateRequest, Message};
use rackham_error::{ModelResult, RetryableError};
use rackham_interface::StoryDriver;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, instrument, warn};

/// Generation parameters applied to every query.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySettings {
    /// Token cap for stage queries
    pub max_tokens: u32,
    /// Sampling temperature for stage queries
    pub temperature: f32,
    /// Prompt sent by the startup probe
    pub probe_prompt: String,
    /// Token cap for the startup probe
    pub probe_max_tokens: u32,
}

impl From<&ModelConfig> for QuerySettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            probe_prompt: config.probe_prompt.clone(),
            probe_max_tokens: config.probe_max_tokens,
        }
    }
}

/// Model driver wrapped with retry and a run-long availability flag.
///
/// The flag starts from a single probe made by [`ModelClient::connect`].
/// Once it is cleared, by a failed probe or a permanent error, it is never
/// set again and every later query returns `Ok(None)` without a network call.
pub struct ModelClient<D> {
    driver: D,
    policy: RetryPolicy,
    settings: QuerySettings,
    available: AtomicBool,
}

impl<D: StoryDriver> ModelClient<D> {
    /// Create a client and probe the service once.
    ///
    /// The probe goes through the retry policy. Any failure leaves the
    /// client unavailable for its lifetime.
    #[instrument(skip_all, fields(provider = driver.provider_name(), model = driver.model_name()))]
    pub async fn connect(driver: D, policy: RetryPolicy, settings: QuerySettings) -> Self {
        let client = Self {
            driver,
            policy,
            settings,
            available: AtomicBool::new(false),
        };

        let request = GenerateRequest {
            messages: vec![Message::user(client.settings.probe_prompt.clone())],
            max_tokens: Some(client.settings.probe_max_tokens),
            temperature: None,
            model: None,
        };

        match client
            .policy
            .execute(|| client.driver.generate(&request))
            .await
        {
            Ok(_) => {
                info!("Model service available");
                client.available.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                error!(error = %e, "Model service probe failed, continuing offline");
            }
        }
        client
    }

    /// Create a client that never calls the service.
    pub fn offline(driver: D, policy: RetryPolicy, settings: QuerySettings) -> Self {
        info!("Model client forced offline");
        Self {
            driver,
            policy,
            settings,
            available: AtomicBool::new(false),
        }
    }

    /// Whether the service may still be queried.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Send a prompt, optionally preceded by a role hint.
    ///
    /// Returns `Ok(Some(text))` with the trimmed response, `Ok(None)` when
    /// the client is unavailable or transient failures exhausted every
    /// attempt, and `Err` for a permanent failure. A permanent failure also
    /// marks the client unavailable for the rest of the run.
    #[instrument(skip(self, prompt, role_hint), fields(prompt_len = prompt.len()))]
    pub async fn query(&self, prompt: &str, role_hint: Option<&str>) -> ModelResult<Option<String>> {
        if !self.is_available() {
            debug!("Model unavailable, skipping query");
            return Ok(None);
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(hint) = role_hint {
            messages.push(Message::system(hint));
        }
        messages.push(Message::user(prompt));

        let request = GenerateRequest {
            messages,
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(self.settings.temperature),
            model: None,
        };

        match self.policy.execute(|| self.driver.generate(&request)).await {
            Ok(response) => {
                let text = response.text.trim().to_string();
                info!(chars = text.len(), "Model query completed");
                Ok(Some(text))
            }
            Err(e) if e.is_retryable() => {
                error!(
                    attempts = self.policy.max_attempts(),
                    error = %e,
                    "Model query failed after all attempts"
                );
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Permanent model error, marking service unavailable");
                self.available.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }
}

impl<D> std::fmt::Debug for ModelClient<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelClient")
            .field("policy", &self.policy)
            .field("settings", &self.settings)
            .field("available", &self.available.load(Ordering::SeqCst))
            .finish()
    }
}
