//! Trait definitions for model backends.

use async_trait::async_trait;
use rackham_core::{GenerateRequest, GenerateResponse};
use rackham_error::ModelResult;
use std::sync::Arc;

/// A text generation backend.
///
/// Implementations perform a single request and report failures as
/// [`rackham_error::ModelError`]s; retry and availability are handled by the
/// caller.
#[async_trait]
pub trait StoryDriver: Send + Sync {
    /// Generate text for a request.
    async fn generate(&self, req: &GenerateRequest) -> ModelResult<GenerateResponse>;

    /// Provider name (e.g., "deepseek").
    fn provider_name(&self) -> &str;

    /// Model identifier (e.g., "deepseek-chat").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: StoryDriver + ?Sized> StoryDriver for Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> ModelResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: StoryDriver + ?Sized> StoryDriver for Box<T> {
    async fn generate(&self, req: &GenerateRequest) -> ModelResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
