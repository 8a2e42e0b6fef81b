//! Conversation engine
//!
//! Routes `/start`, `/price`, button presses and free text against the
//! user's current mode. All output goes through a [`Responder`], so the
//! engine runs the same against Telegram and against the recording
//! responder used in tests.
//!
//! ```text
//!            ask_dobby                      text → model reply
//!   Idle ─────────────► AwaitingFreeQuestion ───────────────► Idle
//!    │
//!    │  crypto                              text → market report
//!    └────────────────► AwaitingCryptoSymbol ───────────────► Idle
//! ```
//!
//! Menu navigation never touches the mode.

use std::sync::Arc;

use async_trait::async_trait;
use crypto_market::{MarketDataClient, NOT_FOUND_MESSAGE, render_report};
use sentient_core::{Assistant, ConversationMode, SessionStore, UserKey};
use url::Url;

use crate::callback::Action;
use crate::faq::FaqTree;
use crate::menus::{self, Menu};

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub const WELCOME: &str =
    "👋 Hey there!\nThis is Sentient Bot (⚠️Unofficial).\nType /start anytime to open the main menu.";
pub const MAIN_MENU_PROMPT: &str = "Welcome to Sentient Helper Bot! Choose an option:";
pub const MAIN_MENU_AGAIN: &str = "Welcome back to main menu! Choose an option:";
pub const CATEGORY_PROMPT: &str = "Select a category:";
pub const ASK_PROMPT: &str = "Ask me anything about Sentient! Type your question:";
pub const CRYPTO_PROMPT: &str =
    "Send the crypto symbol (e.g., BTC, ETH, SOL, DOGE).\n💡 Tip: You can also use /price BTC for quick access!";
pub const THINKING: &str = "🤔 Thinking...";
pub const FETCHING: &str = "📊 Fetching crypto data...";
pub const NEXT_STEP: &str = "What would you like to do next?";
pub const IDLE_HINT: &str = "Use /start to begin!";
pub const PRICE_USAGE: &str = "Usage: /price [symbol]\nExample: /price BTC or /price ethereum";

/// How the chat client should interpret message text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// A new message in the chat
    Send {
        text: String,
        menu: Option<Menu>,
        format: TextFormat,
    },
    /// Replace the message that carried the pressed button
    Edit { text: String, menu: Option<Menu> },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Send {
            text: text.into(),
            menu: None,
            format: TextFormat::Plain,
        }
    }

    pub fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self::Send {
            text: text.into(),
            menu: Some(menu),
            format: TextFormat::Plain,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self::Send {
            text: text.into(),
            menu: None,
            format: TextFormat::Html,
        }
    }

    pub fn edit(text: impl Into<String>, menu: Option<Menu>) -> Self {
        Self::Edit {
            text: text.into(),
            menu,
        }
    }
}

/// Outbound side of the chat transport
#[async_trait]
pub trait Responder: Send + Sync {
    /// Clear the client's loading indicator for a pressed button
    async fn acknowledge(&self) -> HandlerResult;

    async fn reply(&self, reply: Reply) -> HandlerResult;
}

/// Inbound chat event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    Start,
    Price(Option<&'a str>),
    Button(&'a str),
    Text(&'a str),
}

pub struct Conversation {
    sessions: Arc<SessionStore>,
    assistant: Assistant,
    market: Arc<dyn MarketDataClient>,
    faq: Arc<FaqTree>,
    form_link: Url,
}

impl Conversation {
    pub fn new(
        sessions: Arc<SessionStore>,
        assistant: Assistant,
        market: Arc<dyn MarketDataClient>,
        faq: Arc<FaqTree>,
        form_link: Url,
    ) -> Self {
        Self {
            sessions,
            assistant,
            market,
            faq,
            form_link,
        }
    }

    pub const fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub async fn handle(&self, user: UserKey, event: Event<'_>, out: &dyn Responder) -> HandlerResult {
        match event {
            Event::Start => self.start(user, out).await,
            Event::Price(symbol) => self.price(symbol, out).await,
            Event::Button(tag) => self.button(user, tag, out).await,
            Event::Text(text) => self.text(user, text, out).await,
        }
    }

    async fn start(&self, user: UserKey, out: &dyn Responder) -> HandlerResult {
        self.sessions.reset(user).await;

        if self.sessions.mark_seen(user).await {
            tracing::info!(user_id = %user, "new user");
            out.reply(Reply::text(WELCOME)).await?;
        }

        out.reply(Reply::with_menu(MAIN_MENU_PROMPT, menus::main_menu()))
            .await
    }

    /// Only the first word after the command is the symbol
    async fn price(&self, args: Option<&str>, out: &dyn Responder) -> HandlerResult {
        let Some(symbol) = args.and_then(|a| a.split_whitespace().next()) else {
            return out.reply(Reply::text(PRICE_USAGE)).await;
        };

        out.reply(Reply::text(FETCHING)).await?;
        let report = self.crypto_report(symbol).await;
        out.reply(report).await
    }

    async fn button(&self, user: UserKey, tag: &str, out: &dyn Responder) -> HandlerResult {
        out.acknowledge().await?;

        let Some(action) = Action::decode(tag) else {
            tracing::debug!(user_id = %user, tag, "ignoring unknown callback tag");
            return Ok(());
        };

        match action {
            Action::MainMenu => {
                out.reply(Reply::edit(MAIN_MENU_AGAIN, Some(menus::main_menu())))
                    .await
            }
            Action::FaqCategories => {
                let menu = menus::faq_categories(&self.faq, &self.form_link);
                out.reply(Reply::edit(CATEGORY_PROMPT, Some(menu))).await
            }
            Action::Category(index) => {
                let (Some(category), Some(menu)) = (
                    self.faq.category(index),
                    menus::faq_questions(&self.faq, index, &self.form_link),
                ) else {
                    tracing::debug!(user_id = %user, index, "FAQ category out of range");
                    return Ok(());
                };
                let text = format!("Category: {}\nSelect a question:", category.name);
                out.reply(Reply::edit(text, Some(menu))).await
            }
            Action::Question { category, question } => {
                let Some(entry) = self.faq.entry(category, question) else {
                    tracing::debug!(user_id = %user, category, question, "FAQ entry out of range");
                    return Ok(());
                };
                let text = format!("Q: {}\n\nA: {}", entry.question, entry.answer);
                out.reply(Reply::edit(text, Some(menus::faq_answer_back(category))))
                    .await
            }
            Action::AskAi => {
                self.sessions
                    .set_mode(user, ConversationMode::AwaitingFreeQuestion)
                    .await;
                out.reply(Reply::edit(ASK_PROMPT, None)).await
            }
            Action::Crypto => {
                self.sessions
                    .set_mode(user, ConversationMode::AwaitingCryptoSymbol)
                    .await;
                out.reply(Reply::edit(CRYPTO_PROMPT, None)).await
            }
        }
    }

    async fn text(&self, user: UserKey, text: &str, out: &dyn Responder) -> HandlerResult {
        let text = text.trim();
        let mode = self.sessions.mode(user).await;

        match mode {
            ConversationMode::Idle => out.reply(Reply::text(IDLE_HINT)).await,
            ConversationMode::AwaitingFreeQuestion if text.is_empty() => {
                out.reply(Reply::text(ASK_PROMPT)).await
            }
            ConversationMode::AwaitingCryptoSymbol if text.is_empty() => {
                out.reply(Reply::text(CRYPTO_PROMPT)).await
            }
            ConversationMode::AwaitingFreeQuestion => {
                out.reply(Reply::text(THINKING)).await?;

                let answer = match self.assistant.ask(text).await {
                    Ok(answer) => answer,
                    Err(e) => {
                        tracing::warn!(
                            user_id = %user,
                            error = %e,
                            retryable = e.is_retryable(),
                            "assistant request failed"
                        );
                        format!("⚠️ {}", e.user_message())
                    }
                };
                self.sessions.reset(user).await;

                out.reply(Reply::text(format!("Dobby says:\n\n{answer}"))).await
            }
            ConversationMode::AwaitingCryptoSymbol => {
                out.reply(Reply::text(FETCHING)).await?;

                let report = self.crypto_report(text).await;
                self.sessions.reset(user).await;

                out.reply(report).await?;
                out.reply(Reply::with_menu(NEXT_STEP, menus::crypto_follow_up()))
                    .await
            }
        }
    }

    /// Market fetch and model commentary run concurrently, then merge.
    ///
    /// A failed fetch reads like an unknown symbol (plain text); a failed
    /// commentary just leaves the analysis section out of the HTML report.
    async fn crypto_report(&self, symbol: &str) -> Reply {
        let (snapshot, commentary) = tokio::join!(
            self.market.snapshot(symbol),
            self.assistant.crypto_commentary(symbol),
        );

        let snapshot = snapshot.unwrap_or_else(|e| {
            tracing::warn!(symbol, provider = self.market.name(), error = %e, "market fetch failed");
            None
        });

        let Some(snapshot) = snapshot else {
            tracing::info!(symbol, "no market snapshot");
            return Reply::text(NOT_FOUND_MESSAGE);
        };

        let snapshot = match commentary {
            Ok(analysis) => snapshot.with_analysis(analysis),
            Err(e) => {
                tracing::warn!(symbol, error = %e, retryable = e.is_retryable(), "commentary request failed");
                snapshot
            }
        };
        Reply::html(render_report(Some(&snapshot)))
    }
}
