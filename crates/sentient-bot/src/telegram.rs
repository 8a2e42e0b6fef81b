//! Telegram transport
//!
//! Maps teloxide updates onto conversation [`Event`]s and renders
//! [`Reply`]s back as Telegram messages and inline keyboards.

use std::sync::Arc;

use async_trait::async_trait;
use sentient_core::UserKey;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode};
use teloxide::utils::command::BotCommands;

use crate::conversation::{Conversation, Event, HandlerResult, Reply, Responder, TextFormat};
use crate::menus::{Button, Menu};

type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Sentient Bot commands:")]
pub enum Command {
    #[command(description = "open the main menu")]
    Start,
    #[command(description = "live crypto report, e.g. /price BTC")]
    Price(String),
}

/// Dispatcher tree: commands first, then button presses, then plain text
pub fn schema() -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler))
}

pub async fn run(bot: Bot, engine: Arc<Conversation>) {
    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn sender(msg: &Message) -> Option<UserKey> {
    msg.from
        .as_ref()
        .and_then(|u| i64::try_from(u.id.0).ok())
        .map(UserKey)
}

async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    engine: Arc<Conversation>,
) -> HandlerResult {
    let Some(user) = sender(&msg) else {
        return Ok(());
    };
    tracing::info!(user_id = %user, command = ?cmd, "command received");

    let out = TelegramResponder::for_chat(bot, msg.chat.id);
    let event = match &cmd {
        Command::Start => Event::Start,
        Command::Price(symbol) => Event::Price(Some(symbol.as_str())),
    };
    engine.handle(user, event, &out).await
}

async fn message_handler(bot: Bot, msg: Message, engine: Arc<Conversation>) -> HandlerResult {
    // Only text; stickers, photos and the like get no reply
    let (Some(user), Some(text)) = (sender(&msg), msg.text()) else {
        return Ok(());
    };

    if text.starts_with('/') {
        tracing::debug!(user_id = %user, text, "ignoring unknown command");
        return Ok(());
    }

    let out = TelegramResponder::for_chat(bot, msg.chat.id);
    engine.handle(user, Event::Text(text), &out).await
}

async fn callback_handler(bot: Bot, q: CallbackQuery, engine: Arc<Conversation>) -> HandlerResult {
    let user = UserKey(i64::try_from(q.from.id.0)?);
    let tag = q.data.clone().unwrap_or_default();

    let Some(message) = q.message.as_ref() else {
        // Inline-mode message we cannot edit
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    let out = TelegramResponder {
        chat_id: message.chat().id,
        message_id: Some(message.id()),
        query: Some(q.clone()),
        bot,
    };
    engine.handle(user, Event::Button(&tag), &out).await
}

/// Sends into one chat; edits the button's message when there is one
pub struct TelegramResponder {
    bot: Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    query: Option<CallbackQuery>,
}

impl TelegramResponder {
    pub fn for_chat(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            message_id: None,
            query: None,
        }
    }

    async fn send(&self, text: String, menu: Option<Menu>, format: TextFormat) -> HandlerResult {
        let mut request = self.bot.send_message(self.chat_id, text);
        if let Some(menu) = &menu {
            request = request.reply_markup(keyboard(menu));
        }
        if format == TextFormat::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        request.await?;
        Ok(())
    }
}

#[async_trait]
impl Responder for TelegramResponder {
    async fn acknowledge(&self) -> HandlerResult {
        if let Some(q) = &self.query {
            self.bot.answer_callback_query(q.id.clone()).await?;
        }
        Ok(())
    }

    async fn reply(&self, reply: Reply) -> HandlerResult {
        match reply {
            Reply::Send { text, menu, format } => self.send(text, menu, format).await,
            Reply::Edit { text, menu } => {
                let Some(message_id) = self.message_id else {
                    return self.send(text, menu, TextFormat::Plain).await;
                };
                let mut request = self.bot.edit_message_text(self.chat_id, message_id, text);
                if let Some(menu) = &menu {
                    request = request.reply_markup(keyboard(menu));
                }
                request.await?;
                Ok(())
            }
        }
    }
}

pub fn keyboard(menu: &Menu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.rows.iter().map(|row| {
        row.iter()
            .map(|button| match button {
                Button::Callback { label, action } => {
                    InlineKeyboardButton::callback(label.clone(), action.encode())
                }
                Button::Link { label, url } => InlineKeyboardButton::url(label.clone(), url.clone()),
            })
            .collect::<Vec<_>>()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq::FaqTree;
    use crate::menus;
    use teloxide::types::InlineKeyboardButtonKind;
    use url::Url;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", "sentient_bot").unwrap(), Command::Start);
        assert_eq!(
            Command::parse("/price BTC", "sentient_bot").unwrap(),
            Command::Price("BTC".into())
        );
        assert_eq!(
            Command::parse("/price@sentient_bot eth", "sentient_bot").unwrap(),
            Command::Price("eth".into())
        );
        assert!(Command::parse("/help", "sentient_bot").is_err());
    }

    #[test]
    fn test_command_list() {
        let names: Vec<_> = Command::bot_commands()
            .into_iter()
            .map(|c| c.command.trim_start_matches('/').to_string())
            .collect();
        assert_eq!(names, ["start", "price"]);
    }

    #[test]
    fn test_main_menu_keyboard() {
        let markup = keyboard(&menus::main_menu());
        let rows = &markup.inline_keyboard;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0].text, "Sentient Query");
        assert!(matches!(
            &rows[1][0].kind,
            InlineKeyboardButtonKind::CallbackData(data) if data == "ask_dobby"
        ));
    }

    #[test]
    fn test_link_button_keeps_url() {
        let form = Url::parse("https://forms.gle/example").unwrap();
        let markup = keyboard(&menus::faq_categories(&FaqTree::builtin(), &form));

        let link = &markup.inline_keyboard[3][0];
        assert_eq!(link.text, "Any other question (click here)");
        assert!(matches!(&link.kind, InlineKeyboardButtonKind::Url(url) if *url == form));
    }

    #[test]
    fn test_callback_data_fits_telegram_limit() {
        let form = Url::parse("https://forms.gle/example").unwrap();
        let faq = FaqTree::builtin();
        let mut all = vec![menus::main_menu(), menus::faq_categories(&faq, &form)];
        all.extend((0..faq.categories().len()).filter_map(|i| menus::faq_questions(&faq, i, &form)));

        for menu in &all {
            for row in &keyboard(menu).inline_keyboard {
                for button in row {
                    if let InlineKeyboardButtonKind::CallbackData(data) = &button.kind {
                        assert!(data.len() <= 64, "{data}");
                    }
                }
            }
        }
    }
}
