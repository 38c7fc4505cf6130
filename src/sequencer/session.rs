//! Per-session questionnaire state

use super::skip::prune;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// One recorded answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingAnswer,
    Finalized,
}

/// Session record, mutated one answer at a time
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub current_question: String,
    /// Unset until the first answer; then a pruned snapshot of catalog order
    working_questions: Option<Vec<String>>,
    pub answers: Vec<AnswerRecord>,
    pub phase: SessionPhase,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, first_question: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            current_question: first_question.into(),
            working_questions: None,
            answers: Vec::new(),
            phase: SessionPhase::AwaitingAnswer,
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.phase == SessionPhase::Finalized
    }

    pub fn working_questions(&self) -> Option<&[String]> {
        self.working_questions.as_deref()
    }

    /// Record the trimmed answer against the current question
    pub fn record_answer(&mut self, text: &str) {
        self.answers.push(AnswerRecord {
            question: self.current_question.clone(),
            answer: text.trim().to_string(),
        });
        self.touch();
    }

    /// Materialize the working list on first use; later calls keep the snapshot
    pub fn ensure_working_list(&mut self, catalog_order: impl FnOnce() -> Vec<String>) {
        if self.working_questions.is_none() {
            self.working_questions = Some(catalog_order());
        }
    }

    pub fn prune(&mut self, skip: &BTreeSet<String>) {
        if let Some(list) = self.working_questions.as_mut() {
            *list = prune(list, skip);
        }
    }

    pub fn advance_to(&mut self, question: impl Into<String>) {
        self.current_question = question.into();
    }

    pub fn finish(&mut self) {
        self.phase = SessionPhase::Finalized;
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// Whether the session has been idle for longer than `ttl`
    pub fn is_idle_for(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.last_active_at > ttl
    }
}
