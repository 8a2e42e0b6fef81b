//! # sentient-bot
//!
//! Telegram helper for the Sentient community: FAQ menus, free questions
//! to Dobby and live crypto reports. A small axum listener serves the
//! `/dobby` echo endpoint next to the bot.
//!
//! [`conversation::Conversation`] holds all routing and per-user state
//! logic; [`telegram`] only adapts it to teloxide.

pub mod callback;
pub mod config;
pub mod conversation;
pub mod faq;
pub mod http;
pub mod menus;
pub mod telegram;

pub use config::{BotConfig, ConfigError};
pub use conversation::{Conversation, Event, Reply, Responder};
pub use faq::FaqTree;
