//! Driver for OpenAI-compatible chat completion APIs (DeepSeek and friends).

use async_trait::async_trait;
use derive_getters::Getters;
use rackham_config::ModelConfig;
use rackham_core::{GenerateRequest, GenerateResponse, Role};
use rackham_error::{ModelError, ModelErrorKind, ModelResult};
use rackham_interface::StoryDriver;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize, Getters)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize, Getters)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize, Getters)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    provider: String,
}

impl OpenAICompatibleClient {
    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(skip(api_key), fields(provider = %provider, model = %model))]
    pub fn new(
        api_key: String,
        base_url: &str,
        model: String,
        provider: String,
        timeout: Duration,
    ) -> ModelResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::new(ModelErrorKind::Builder(e.to_string())))?;
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        debug!(endpoint = %endpoint, "Created chat completions client");

        Ok(Self {
            client,
            api_key,
            endpoint,
            model,
            provider,
        })
    }

    /// Creates a client from configuration, reading the key from the
    /// environment variable named by `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::MissingApiKey`] if the variable is unset or empty.
    #[instrument(skip_all, fields(provider = %config.provider, model = %config.model))]
    pub fn from_config(config: &ModelConfig) -> ModelResult<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ModelError::new(ModelErrorKind::MissingApiKey(config.api_key_env.clone()))
            })?;

        Self::new(
            api_key,
            &config.base_url,
            config.model.clone(),
            config.provider.clone(),
            config.timeout(),
        )
    }

    /// Full request URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(e: reqwest::Error) -> ModelError {
    if e.is_timeout() {
        ModelError::new(ModelErrorKind::Timeout(e.to_string()))
    } else {
        ModelError::new(ModelErrorKind::Transport(e.to_string()))
    }
}

#[async_trait]
impl StoryDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = %self.provider, model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> ModelResult<GenerateResponse> {
        let body = ChatRequest {
            model: req.model.as_deref().unwrap_or(&self.model),
            messages: req
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };

        debug!(messages = body.messages.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::new(ModelErrorKind::Http {
                status_code: status.as_u16(),
                message,
            }));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ModelError::new(ModelErrorKind::Timeout(e.to_string()))
            } else {
                ModelError::new(ModelErrorKind::InvalidResponse(e.to_string()))
            }
        })?;

        let text = parsed
            .choices()
            .first()
            .and_then(|choice| choice.message().content().clone())
            .ok_or_else(|| ModelError::new(ModelErrorKind::EmptyResponse))?;

        debug!(chars = text.len(), "Received chat completion");
        Ok(GenerateResponse { text })
    }

    fn provider_name(&self) -> &str {
        &self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rackham_core::Message;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = OpenAICompatibleClient::new(
            "key".to_string(),
            "https://api.deepseek.com/",
            "deepseek-chat".to_string(),
            "deepseek".to_string(),
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "https://api.deepseek.com/chat/completions");
    }

    #[test]
    fn request_body_uses_lowercase_roles() {
        let messages = [Message::system("be brief"), Message::user("hi")];
        let body = ChatRequest {
            model: "deepseek-chat",
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            max_tokens: Some(5),
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 5);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn response_without_content_is_empty() {
        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(parsed.choices()[0].message().content().is_none());
    }
}
