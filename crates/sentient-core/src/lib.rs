//! # sentient-core
//!
//! Provider-agnostic building blocks for the Sentient helper bot.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Conversation engine                      │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │ SessionStore │   │  Assistant   │───│   LlmProvider    │  │
//! │  │ (per user)   │   │ (role + cap) │   │   (Strategy)     │  │
//! │  └──────────────┘   └──────────────┘   └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the bot talk to the hosted inference
//! endpoint in production and to a scripted [`MockProvider`] in tests.

pub mod assistant;
pub mod error;
pub mod message;
pub mod mock;
pub mod provider;
pub mod session;

pub use assistant::Assistant;
pub use error::{AgentError, Result};
pub use message::{Message, Role};
pub use mock::MockProvider;
pub use provider::{Completion, GenerationOptions, LlmProvider};
pub use session::{ConversationMode, SessionStore, UserKey};
