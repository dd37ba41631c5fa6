//! Model service access for the Rackham story pipeline.
//!
//! - [`OpenAICompatibleClient`] speaks the chat-completions protocol used by
//!   DeepSeek and other OpenAI-compatible services.
//! - [`RetryPolicy`] retries transient failures with exponential backoff.
//! - [`ModelClient`] wraps a driver with a startup probe and a run-long
//!   availability flag, turning exhausted retries into "no result".

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod openai_compat;
mod retry;

pub use client::{ModelClient, QuerySettings};
pub use openai_compat::OpenAICompatibleClient;
pub use retry::RetryPolicy;
