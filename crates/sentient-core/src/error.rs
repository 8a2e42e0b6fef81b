//! Error Types

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors raised while talking to a language-model provider
#[derive(Error, Debug)]
pub enum AgentError {
    /// Provider returned an error status or an unusable body
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable (connect failure, timeout)
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered but without any generated text
    #[error("Empty completion from {0}")]
    EmptyCompletion(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Check if error is transient. Nothing retries today; callers only log it.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::RateLimited(_)
        )
    }

    /// Convert to a message that is safe to show a chat user
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(_) | Self::EmptyCompletion(_) | Self::Json(_) => {
                "The AI service returned an unexpected response. Please try again.".into()
            }
            Self::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again later.".into()
            }
            Self::RateLimited(_) => {
                "The AI service is busy right now. Please wait a moment and retry.".into()
            }
            Self::Auth(_) | Self::Config(_) => {
                "The AI service is not configured correctly. Please contact the bot admin.".into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_detail() {
        let err = AgentError::Provider("HTTP 500: stack trace here".into());
        assert!(!err.user_message().contains("stack trace"));
        assert!(err.to_string().contains("stack trace"));
    }

    #[test]
    fn test_retryable() {
        assert!(AgentError::ProviderUnavailable("timeout".into()).is_retryable());
        assert!(AgentError::RateLimited("429".into()).is_retryable());
        assert!(!AgentError::Auth("401".into()).is_retryable());
    }
}
