//! Scripted driver for pipeline tests.

use async_trait::async_trait;
use rackham_core::{GenerateRequest, GenerateResponse};
use rackham_error::{ModelError, ModelErrorKind, ModelResult};
use rackham_interface::StoryDriver;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(ModelErrorKind),
}

#[derive(Debug)]
struct MockState {
    script: VecDeque<MockResponse>,
    then: MockResponse,
    requests: Vec<GenerateRequest>,
}

/// Driver that replays a script, then repeats a final reply forever.
///
/// Clones share state, so a test can keep a handle after moving the driver
/// into a client.
#[derive(Debug, Clone)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl MockDriver {
    /// Reply with `responses` in order, then with `then` forever.
    pub fn scripted(responses: Vec<MockResponse>, then: MockResponse) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                script: responses.into(),
                then,
                requests: Vec::new(),
            })),
        }
    }

    /// Always succeed with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::scripted(Vec::new(), MockResponse::Success(text.into()))
    }

    /// Answer the startup probe, then reply with each stage response in order.
    ///
    /// Calls beyond the script get an empty reply.
    pub fn stages(responses: impl IntoIterator<Item = MockResponse>) -> Self {
        let mut script = vec![MockResponse::Success("pong".to_string())];
        script.extend(responses);
        Self::scripted(script, MockResponse::Success(String::new()))
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl StoryDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> ModelResult<GenerateResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(req.clone());
        let reply = state.script.pop_front().unwrap_or_else(|| state.then.clone());
        match reply {
            MockResponse::Success(text) => Ok(GenerateResponse { text }),
            MockResponse::Error(kind) => Err(ModelError::new(kind)),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
