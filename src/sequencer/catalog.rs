//! Per-request catalog snapshot

use super::symptoms::normalize;
use crate::db::{Question, SkipRule};
use std::collections::BTreeSet;

/// Questions (in catalog order) and skip rules as read for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub questions: Vec<Question>,
    pub rules: Vec<SkipRule>,
}

impl Catalog {
    pub fn new(mut questions: Vec<Question>, rules: Vec<SkipRule>) -> Self {
        questions.sort_by_key(|q| q.id);
        Self { questions, rules }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn first_question(&self) -> Option<&Question> {
        self.questions.first()
    }

    /// Question texts in catalog order
    pub fn question_texts(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.text.clone()).collect()
    }

    /// Suggestions for the first question with this text; empty if unknown
    pub fn suggestions_for(&self, text: &str) -> Vec<String> {
        self.questions
            .iter()
            .find(|q| q.text == text)
            .map(Question::suggestions)
            .unwrap_or_default()
    }

    /// Distinct normalized trigger phrases across all rules
    pub fn trigger_phrases(&self) -> BTreeSet<String> {
        self.rules
            .iter()
            .map(|r| normalize(&r.trigger_answer))
            .collect()
    }
}
