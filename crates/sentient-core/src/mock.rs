//! Mock Provider
//!
//! Scripted provider for tests. Records every request it receives.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{Completion, FinishReason, GenerationOptions, LlmProvider};

type RecordedCall = (Vec<Message>, GenerationOptions);

/// Provider that answers every request with the same canned text, or fails
pub struct MockProvider {
    reply: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `ProviderUnavailable`
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.reply.is_some())
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.calls
            .lock()
            .await
            .push((messages.to_vec(), options.clone()));

        let content = self
            .reply
            .clone()
            .ok_or_else(|| AgentError::ProviderUnavailable("mock provider offline".into()))?;

        Ok(Completion {
            content,
            model: options.model.clone(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        })
    }
}
