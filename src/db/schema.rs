//! Database schema and catalog record types

use serde::Deserialize;

/// Separator used inside `possible_answers` to delimit suggestions
pub const SUGGESTION_SEPARATOR: char = '/';

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS general_questions (
    question_id INTEGER PRIMARY KEY,
    question_text TEXT NOT NULL,
    possible_answers TEXT
);

CREATE TABLE IF NOT EXISTS skip_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    parent_question_text TEXT NOT NULL,
    trigger_answer TEXT NOT NULL,
    skip_child_text TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_general_questions_text ON general_questions(question_text);
";

/// A catalog question. The id defines presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    /// Raw `/`-separated suggestion string as stored
    #[serde(default)]
    pub possible_answers: Option<String>,
}

impl Question {
    pub fn new(id: i64, text: impl Into<String>, possible_answers: Option<&str>) -> Self {
        Self {
            id,
            text: text.into(),
            possible_answers: possible_answers.map(String::from),
        }
    }

    /// Suggestions split from `possible_answers`; empty when absent or blank
    pub fn suggestions(&self) -> Vec<String> {
        match self.possible_answers.as_deref() {
            Some(raw) if !raw.is_empty() => raw
                .split(SUGGESTION_SEPARATOR)
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// "If the answer to `parent_question_text` mentions `trigger_answer`,
/// the question `skip_child_text` becomes irrelevant."
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkipRule {
    pub parent_question_text: String,
    pub trigger_answer: String,
    pub skip_child_text: String,
}

impl SkipRule {
    pub fn new(
        parent_question_text: impl Into<String>,
        trigger_answer: impl Into<String>,
        skip_child_text: impl Into<String>,
    ) -> Self {
        Self {
            parent_question_text: parent_question_text.into(),
            trigger_answer: trigger_answer.into(),
            skip_child_text: skip_child_text.into(),
        }
    }
}

/// On-disk document used to seed an empty catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub skip_rules: Vec<SkipRule>,
}
