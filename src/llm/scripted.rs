//! A local reasoning engine driven by a closure, for tests and offline runs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ChatMessage, LlmClient, LlmError, LlmResponse, ToolSchema};

type Responder = dyn Fn(&[ChatMessage]) -> Result<LlmResponse, LlmError> + Send + Sync;

/// Engine whose every step is computed from the conversation so far.
///
/// Deciding from the messages (rather than popping a shared queue) keeps
/// concurrent requests independent of each other.
#[derive(Clone)]
pub struct ScriptedClient {
    responder: Arc<Responder>,
    delay: Option<Duration>,
}

impl ScriptedClient {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[ChatMessage]) -> Result<LlmResponse, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            delay: None,
        }
    }

    /// Always answer with the same text.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(LlmResponse::text(text.clone())))
    }

    /// Sleep before every step, simulating network latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn chat_completion(
        &self,
        _model: &str,
        messages: &[ChatMessage],
        _tools: Option<&[ToolSchema]>,
    ) -> Result<LlmResponse, LlmError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.responder)(messages)
    }
}
