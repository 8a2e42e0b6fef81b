//! Static FAQ tree: category → question → answer
//!
//! Order is preserved so menus render the same way every time. The tree is
//! built once at startup and never mutated.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaqError {
    #[error("cannot read FAQ file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid FAQ JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("FAQ category '{0}' has no questions")]
    EmptyCategory(String),

    #[error("FAQ has no categories")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqCategory {
    pub name: String,
    pub entries: Vec<FaqEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaqTree {
    categories: Vec<FaqCategory>,
}

fn entry(question: &str, answer: &str) -> FaqEntry {
    FaqEntry {
        question: question.into(),
        answer: answer.into(),
    }
}

impl FaqTree {
    pub fn new(categories: Vec<FaqCategory>) -> Result<Self, FaqError> {
        if categories.is_empty() {
            return Err(FaqError::Empty);
        }
        if let Some(empty) = categories.iter().find(|c| c.entries.is_empty()) {
            return Err(FaqError::EmptyCategory(empty.name.clone()));
        }
        Ok(Self { categories })
    }

    /// The FAQ the bot ships with
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                FaqCategory {
                    name: "About Sentient".into(),
                    entries: vec![
                        entry(
                            "What is Sentient?",
                            "Open-source, community-driven Artificial General Intelligence (AGI).\n\
                             Focuses on 'Loyal AI' with tools like ROMA, GRID, and Sentient Chat, \
                             using blockchain for governance.\n\
                             For more detail you can check this thread:\n\
                             https://x.com/Zun2025/status/1972979253059666085.",
                        ),
                        entry(
                            "How to connect with Sentient?",
                            "You can join via our website:\nhttps://www.sentient.xyz/",
                        ),
                    ],
                },
                FaqCategory {
                    name: "Incentive".into(),
                    entries: vec![entry(
                        "Is there any incentive program ongoing?",
                        "Yes, there is an incentive program for people who can contribute \
                         in Sentient from these 4 categories:\n\
                         1. Helper\n2. Builder\n3. Artist\n4. Educator\n\n\
                         You can check more about this from role option.",
                    )],
                },
                FaqCategory {
                    name: "Role".into(),
                    entries: vec![
                        entry(
                            "How many Discord roles are there?",
                            "There are 4 types of roles in Discord and each role has its own \
                             level starting from L1, L2, L3,\n\
                             along with Early, Advance, and Sentient AGI role.",
                        ),
                        entry(
                            "Can I apply for early AGI role without hitting level 3?",
                            "The answer is yes,\n\
                             If you think your contribution is worth it then go for it,\n\
                             Team will sure give you the role.",
                        ),
                    ],
                },
            ],
        }
    }

    /// Parse a JSON array of `{"name", "entries": [{"question", "answer"}]}`
    pub fn from_json(raw: &str) -> Result<Self, FaqError> {
        let categories: Vec<FaqCategory> = serde_json::from_str(raw)?;
        Self::new(categories)
    }

    pub fn load(path: &Path) -> Result<Self, FaqError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FaqError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn categories(&self) -> &[FaqCategory] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&FaqCategory> {
        self.categories.get(index)
    }

    pub fn entry(&self, category: usize, question: usize) -> Option<&FaqEntry> {
        self.category(category)?.entries.get(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let faq = FaqTree::builtin();
        let names: Vec<_> = faq.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["About Sentient", "Incentive", "Role"]);

        assert_eq!(faq.category(2).unwrap().entries.len(), 2);
        assert_eq!(
            faq.entry(0, 1).unwrap().answer,
            "You can join via our website:\nhttps://www.sentient.xyz/"
        );
        assert!(faq.entry(1, 1).is_none());
        assert!(faq.category(3).is_none());
    }

    #[test]
    fn test_builtin_answers_keep_line_breaks() {
        let faq = FaqTree::builtin();
        let incentive = &faq.entry(1, 0).unwrap().answer;
        assert!(incentive.contains("categories:\n1. Helper\n2. Builder\n3. Artist\n4. Educator\n\n"));
    }

    #[test]
    fn test_from_json() {
        let faq = FaqTree::from_json(
            r#"[{"name": "Basics", "entries": [{"question": "Q1?", "answer": "A1"}]}]"#,
        )
        .unwrap();
        assert_eq!(faq.entry(0, 0).unwrap().question, "Q1?");
    }

    #[test]
    fn test_from_json_rejects_empty() {
        assert!(matches!(FaqTree::from_json("[]"), Err(FaqError::Empty)));
        assert!(matches!(
            FaqTree::from_json(r#"[{"name": "Hollow", "entries": []}]"#),
            Err(FaqError::EmptyCategory(name)) if name == "Hollow"
        ));
        assert!(matches!(FaqTree::from_json("{"), Err(FaqError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = FaqTree::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(FaqError::Io { .. })));
    }
}
