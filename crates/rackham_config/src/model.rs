//! Model service and retry settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the model service.
///
/// The API key itself never lives in configuration; `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Provider label used in logs
    pub provider: String,
    /// Base URL of an OpenAI-compatible chat completions API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Prompt sent by the availability probe
    pub probe_prompt: String,
    /// Token cap for the availability probe
    pub probe_max_tokens: u32,
}

impl ModelConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Exponential backoff settings.
///
/// Attempt `n` (zero-based) that fails transiently is followed by a wait of
/// `base_delay * 2^n`, except after the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds
    pub base_delay_ms: u64,
}

impl RetryConfig {
    /// Delay before the first retry.
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}
