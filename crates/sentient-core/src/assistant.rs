//! Assistant Adapters
//!
//! The two fixed-role prompts the bot sends to the hosted model: a general
//! community assistant and a short crypto commentary.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::Message;
use crate::provider::{GenerationOptions, LlmProvider};

/// System role for free-form questions
pub const COMMUNITY_ROLE: &str = "You are Dobby AI, assistant for Sentient community.";

/// System role for per-symbol commentary
pub const CRYPTO_ANALYST_ROLE: &str = "You are QuillCheck, the Sentient crypto analysis agent.";

pub const QUESTION_MAX_TOKENS: u32 = 300;
pub const COMMENTARY_MAX_TOKENS: u32 = 150;

/// Thin wrapper binding a provider to a model and the bot's prompts
#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl Assistant {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Forward a user question verbatim under the community role
    pub async fn ask(&self, question: &str) -> Result<String> {
        self.run(COMMUNITY_ROLE, question, QUESTION_MAX_TOKENS).await
    }

    /// Short trend/sentiment commentary for a ticker
    pub async fn crypto_commentary(&self, symbol: &str) -> Result<String> {
        self.run(
            CRYPTO_ANALYST_ROLE,
            &commentary_prompt(symbol),
            COMMENTARY_MAX_TOKENS,
        )
        .await
    }

    async fn run(&self, role: &str, prompt: &str, max_tokens: u32) -> Result<String> {
        let messages = [Message::system(role), Message::user(prompt)];
        let options = GenerationOptions::new(self.model.clone()).with_max_tokens(max_tokens);

        let completion = self.provider.complete(&messages, &options).await?;
        let content = completion.content.trim();
        if content.is_empty() {
            return Err(AgentError::EmptyCompletion(self.provider.name().to_string()));
        }

        tracing::debug!(
            provider = self.provider.name(),
            model = %self.model,
            max_tokens,
            chars = content.len(),
            "completion received"
        );
        Ok(content.to_string())
    }
}

pub fn commentary_prompt(symbol: &str) -> String {
    format!(
        "Give a short crypto analysis for {} (trend, sentiment, major movements).",
        symbol.to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use crate::message::Role;

    #[tokio::test]
    async fn test_ask_uses_community_role_and_cap() {
        let mock = Arc::new(MockProvider::replying("Hello from Dobby"));
        let assistant = Assistant::new(mock.clone(), "dobby");

        let answer = assistant.ask("What is ROMA?").await.unwrap();
        assert_eq!(answer, "Hello from Dobby");

        let calls = mock.calls().await;
        assert_eq!(calls.len(), 1);
        let (messages, options) = &calls[0];
        assert_eq!(messages[0], Message::system(COMMUNITY_ROLE));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "What is ROMA?");
        assert_eq!(options.max_tokens, 300);
        assert_eq!(options.model, "dobby");
    }

    #[tokio::test]
    async fn test_commentary_prompt_and_cap() {
        let mock = Arc::new(MockProvider::replying("Sideways."));
        let assistant = Assistant::new(mock.clone(), "dobby");

        assistant.crypto_commentary("sol").await.unwrap();

        let calls = mock.calls().await;
        let (messages, options) = &calls[0];
        assert_eq!(messages[0].content, CRYPTO_ANALYST_ROLE);
        assert_eq!(
            messages[1].content,
            "Give a short crypto analysis for SOL (trend, sentiment, major movements)."
        );
        assert_eq!(options.max_tokens, 150);
    }

    #[tokio::test]
    async fn test_failure_is_an_error_not_text() {
        let assistant = Assistant::new(Arc::new(MockProvider::failing()), "dobby");
        let result = assistant.ask("hi").await;
        assert!(matches!(result, Err(AgentError::ProviderUnavailable(_))));
    }

    #[tokio::test]
    async fn test_blank_completion_is_an_error() {
        let assistant = Assistant::new(Arc::new(MockProvider::replying("   ")), "dobby");
        let result = assistant.ask("hi").await;
        assert!(matches!(result, Err(AgentError::EmptyCompletion(_))));
    }
}
