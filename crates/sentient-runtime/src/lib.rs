//! # sentient-runtime
//!
//! Runtime providers for the Sentient bot.
//!
//! ## Providers
//!
//! - **Hugging Face** (default): hosted inference through the router's
//!   OpenAI-compatible chat-completions API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sentient_runtime::HuggingFaceProvider;
//!
//! let provider = HuggingFaceProvider::from_config(HuggingFaceConfig::default())?;
//! let assistant = Assistant::new(Arc::new(provider), model);
//! ```

#[cfg(feature = "huggingface")]
pub mod huggingface;

#[cfg(feature = "huggingface")]
pub use huggingface::{HuggingFaceConfig, HuggingFaceProvider};

// Re-export core types for convenience
pub use sentient_core::{AgentError, Assistant, LlmProvider, Message, Result, Role};

/// Mask a secret for logging: first 7 chars + "***" + last 4.
/// Anything 11 chars or shorter becomes "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("hf_abcdefghijklmnop"), "hf_abcd***mnop");
        assert_eq!(mask_token("short"), "***");
        assert_eq!(mask_token(""), "***");
    }
}
