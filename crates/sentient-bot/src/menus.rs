//! Inline menus, described independently of the chat transport

use url::Url;

use crate::callback::Action;
use crate::faq::FaqTree;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Callback { label: String, action: Action },
    Link { label: String, url: Url },
}

impl Button {
    pub fn callback(label: impl Into<String>, action: Action) -> Self {
        Self::Callback {
            label: label.into(),
            action,
        }
    }

    pub fn link(label: impl Into<String>, url: Url) -> Self {
        Self::Link {
            label: label.into(),
            url,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Callback { label, .. } | Self::Link { label, .. } => label,
        }
    }
}

/// One button per row unless stated otherwise
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<Button>>,
}

impl Menu {
    fn push(mut self, button: Button) -> Self {
        self.rows.push(vec![button]);
        self
    }

    /// Every button, row by row
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.buttons()
            .filter_map(|b| match b {
                Button::Callback { action, .. } => Some(*action),
                Button::Link { .. } => None,
            })
            .collect()
    }
}

const OTHER_QUESTION: &str = "Any other question (click here)";
const BACK: &str = "🔙 Back";

pub fn main_menu() -> Menu {
    Menu::default()
        .push(Button::callback("Sentient Query", Action::FaqCategories))
        .push(Button::callback("Ask Dobby AI Anything", Action::AskAi))
        .push(Button::callback("Live Crypto Prices", Action::Crypto))
}

pub fn faq_categories(faq: &FaqTree, form_link: &Url) -> Menu {
    faq.categories()
        .iter()
        .enumerate()
        .fold(Menu::default(), |menu, (i, category)| {
            menu.push(Button::callback(category.name.clone(), Action::Category(i)))
        })
        .push(Button::link(OTHER_QUESTION, form_link.clone()))
        .push(Button::callback(BACK, Action::MainMenu))
}

/// Question list for one category; `None` if the index is out of range
pub fn faq_questions(faq: &FaqTree, category: usize, form_link: &Url) -> Option<Menu> {
    let entries = &faq.category(category)?.entries;
    let menu = entries
        .iter()
        .enumerate()
        .fold(Menu::default(), |menu, (question, entry)| {
            menu.push(Button::callback(
                entry.question.clone(),
                Action::Question { category, question },
            ))
        })
        .push(Button::link(OTHER_QUESTION, form_link.clone()))
        .push(Button::callback(BACK, Action::FaqCategories));
    Some(menu)
}

pub fn faq_answer_back(category: usize) -> Menu {
    Menu::default().push(Button::callback(BACK, Action::Category(category)))
}

pub fn crypto_follow_up() -> Menu {
    Menu::default()
        .push(Button::callback("Check Another Crypto", Action::Crypto))
        .push(Button::callback("🔙 Main Menu", Action::MainMenu))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> Url {
        Url::parse("https://forms.gle/example").unwrap()
    }

    #[test]
    fn test_main_menu() {
        let menu = main_menu();
        assert_eq!(menu.actions(), [Action::FaqCategories, Action::AskAi, Action::Crypto]);
        assert_eq!(menu.rows.len(), 3);
    }

    #[test]
    fn test_category_menu_has_link_and_back() {
        let faq = FaqTree::builtin();
        let menu = faq_categories(&faq, &form());

        let labels: Vec<_> = menu.buttons().map(Button::label).collect();
        assert_eq!(
            labels,
            ["About Sentient", "Incentive", "Role", OTHER_QUESTION, BACK]
        );
        assert_eq!(menu.actions().last(), Some(&Action::MainMenu));
        assert!(matches!(&menu.rows[3][0], Button::Link { url, .. } if *url == form()));
    }

    #[test]
    fn test_question_menu_lists_only_its_category() {
        let faq = FaqTree::builtin();
        let menu = faq_questions(&faq, 2, &form()).unwrap();

        let questions: Vec<_> = menu
            .buttons()
            .filter_map(|b| match b {
                Button::Callback { label, action: Action::Question { category, .. } } => {
                    assert_eq!(*category, 2);
                    Some(label.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            questions,
            [
                "How many Discord roles are there?",
                "Can I apply for early AGI role without hitting level 3?"
            ]
        );
        assert_eq!(menu.actions().last(), Some(&Action::FaqCategories));
    }

    #[test]
    fn test_question_menu_out_of_range() {
        assert!(faq_questions(&FaqTree::builtin(), 9, &form()).is_none());
    }
}
