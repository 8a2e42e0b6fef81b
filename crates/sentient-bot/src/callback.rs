//! Callback tags carried by inline buttons
//!
//! FAQ entries are addressed by index so every tag stays well under
//! Telegram's 64-byte callback-data limit.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MainMenu,
    FaqCategories,
    Category(usize),
    Question { category: usize, question: usize },
    AskAi,
    Crypto,
}

impl Action {
    pub fn encode(self) -> String {
        match self {
            Self::MainMenu => "main_menu".into(),
            Self::FaqCategories => "sentient_query".into(),
            Self::Category(c) => format!("cat|{c}"),
            Self::Question { category, question } => format!("q|{category}|{question}"),
            Self::AskAi => "ask_dobby".into(),
            Self::Crypto => "crypto".into(),
        }
    }

    /// `None` for anything this bot never issued
    pub fn decode(tag: &str) -> Option<Self> {
        match tag {
            "main_menu" => return Some(Self::MainMenu),
            "sentient_query" => return Some(Self::FaqCategories),
            "ask_dobby" => return Some(Self::AskAi),
            "crypto" => return Some(Self::Crypto),
            _ => {}
        }

        let mut parts = tag.split('|');
        let action = match (parts.next()?, parts.next(), parts.next()) {
            ("cat", Some(c), None) => Self::Category(c.parse().ok()?),
            ("q", Some(c), Some(q)) => Self::Question {
                category: c.parse().ok()?,
                question: q.parse().ok()?,
            },
            _ => return None,
        };

        parts.next().is_none().then_some(action)
    }
}
