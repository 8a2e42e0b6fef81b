//! Hugging Face LLM Provider
//!
//! Implementation of `LlmProvider` for the Hugging Face inference router,
//! which speaks the OpenAI chat-completions wire format.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use sentient_core::{
    error::{AgentError, Result},
    message::Message,
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};

use crate::mask_token;

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
pub const DEFAULT_MODEL: &str = "SentientAGI/Dobby-Mini-Unhinged-Llama-3.1-8B";

/// Hugging Face provider configuration
#[derive(Clone)]
pub struct HuggingFaceConfig {
    /// OpenAI-compatible base URL (without trailing `/chat/completions`)
    pub base_url: String,

    /// API token; requests go out unauthenticated without it
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            token: None,
            timeout_secs: 120,
        }
    }
}

impl std::fmt::Debug for HuggingFaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_deref().map(mask_token))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Hugging Face LLM provider
pub struct HuggingFaceProvider {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceProvider {
    /// Create from configuration
    pub fn from_config(config: HuggingFaceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn build_request<'a>(
        messages: &'a [Message],
        options: &'a GenerationOptions,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &options.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        }
    }

    /// Convert the wire response to a completion
    fn convert_completion(response: ChatCompletionResponse, model: &str) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::EmptyCompletion(model.to_string()))?;

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

/// Map a non-success status and body to an error
fn status_error(status: StatusCode, body: &str) -> AgentError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    let detail = format!("HTTP {}: {}", status.as_u16(), detail);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AgentError::Auth(detail),
        StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(detail),
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => {
            AgentError::ProviderUnavailable(detail)
        }
        _ => AgentError::Provider(detail),
    }
}

fn transport_error(err: &reqwest::Error) -> AgentError {
    if err.is_timeout() || err.is_connect() {
        AgentError::ProviderUnavailable(err.to_string())
    } else {
        AgentError::Provider(err.to_string())
    }
}

#[async_trait]
impl LlmProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .request(self.client.get(self.endpoint("models")))
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => Ok(true),
            Ok(r) => {
                tracing::warn!(status = %r.status(), "Hugging Face health check failed");
                Ok(false)
            }
            Err(e) => {
                tracing::warn!("Hugging Face health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let body = Self::build_request(messages, options);

        let response = self
            .request(self.client.post(self.endpoint("chat/completions")))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| transport_error(&e))?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        let completion = Self::convert_completion(parsed, &options.model)?;

        if let Some(usage) = &completion.usage {
            tracing::info!(
                model = %completion.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }

        Ok(completion)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// Error bodies come either as `{"error": "..."}` or `{"error": {"message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: serde_json::Value,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        match self.error {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(ToString::to_string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = HuggingFaceConfig::default();
        assert_eq!(config.base_url, "https://router.huggingface.co/v1");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_debug_masks_token() {
        let config = HuggingFaceConfig {
            token: Some("hf_supersecretvalue1234".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("hf_supe***1234"));
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let provider = HuggingFaceProvider::from_config(HuggingFaceConfig {
            base_url: "https://example.test/v1/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            provider.endpoint("chat/completions"),
            "https://example.test/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::system("You are helpful."), Message::user("Hello")];
        let options = GenerationOptions::new("dobby").with_max_tokens(150);

        let body = serde_json::to_value(HuggingFaceProvider::build_request(&messages, &options))
            .unwrap();
        assert_eq!(body["model"], "dobby");
        assert_eq!(body["max_tokens"], 150);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Hello");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_convert_completion() {
        let raw = r#"{
            "model": "SentientAGI/Dobby",
            "choices": [{"message": {"role": "assistant", "content": "gm"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 2, "total_tokens": 14}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        let completion = HuggingFaceProvider::convert_completion(parsed, "fallback").unwrap();

        assert_eq!(completion.content, "gm");
        assert_eq!(completion.model, "SentientAGI/Dobby");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage.unwrap().total_tokens, 14);
    }

    #[test]
    fn test_no_choices_is_error() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let result = HuggingFaceProvider::convert_completion(parsed, "dobby");
        assert!(matches!(result, Err(AgentError::EmptyCompletion(_))));
    }

    #[test]
    fn test_status_mapping() {
        let auth = status_error(StatusCode::UNAUTHORIZED, r#"{"error": "Invalid credentials"}"#);
        assert!(matches!(auth, AgentError::Auth(ref m) if m.contains("Invalid credentials")));

        let limited = status_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "slow down"}}"#,
        );
        assert!(matches!(limited, AgentError::RateLimited(ref m) if m.contains("slow down")));

        let down = status_error(StatusCode::SERVICE_UNAVAILABLE, "<html>");
        assert!(matches!(down, AgentError::ProviderUnavailable(_)));

        let other = status_error(StatusCode::BAD_REQUEST, "model not supported");
        assert!(matches!(other, AgentError::Provider(ref m) if m.contains("HTTP 400")));
    }
}
