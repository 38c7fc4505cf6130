//! Pure per-answer step
//!
//! Given a session, the catalog snapshot for this request and the user's
//! text, record the answer, prune the working list and pick the next
//! question. No I/O; the runtime performs classification on exhaustion.

use super::finalize::build_transcript;
use super::skip::{resolve_skips, SkipPolicy};
use super::symptoms::mentioned_symptoms;
use super::{Catalog, Session};
use std::collections::BTreeSet;
use thiserror::Error;

/// What the caller should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Ask another question
    Next {
        question: String,
        suggestions: Vec<String>,
    },
    /// Sequence exhausted; classify the transcript
    Exhausted { transcript: String },
}

/// Result of one step, with the intermediate values for logging
#[derive(Debug, Clone)]
pub struct Advance {
    pub mentioned: BTreeSet<String>,
    pub policy: SkipPolicy,
    pub skipped: BTreeSet<String>,
    /// Index of the answered question in the pruned list, if still present
    pub answered_index: Option<usize>,
    pub next_index: usize,
    pub step: Step,
}

impl Advance {
    /// The answered question vanished from the list, so scanning resumed
    /// at the first remaining question
    pub fn resumed_from_start(&self) -> bool {
        self.answered_index.is_none()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("Session already finalized")]
    Finalized,
}

/// Apply one answer to the session
pub fn advance(
    session: &mut Session,
    catalog: &Catalog,
    user_text: &str,
) -> Result<Advance, StepError> {
    if session.is_finalized() {
        return Err(StepError::Finalized);
    }

    let current = session.current_question.clone();
    session.record_answer(user_text);

    let mentioned = mentioned_symptoms(user_text, &catalog.trigger_phrases());
    let policy = SkipPolicy::for_mentions(&mentioned);
    let skipped = resolve_skips(&mentioned, &catalog.rules, &current);

    session.ensure_working_list(|| catalog.question_texts());
    session.prune(&skipped);

    let list = session.working_questions().unwrap_or_default();
    let answered_index = list.iter().position(|q| *q == current);
    // Not found behaves as index -1: restart at the first remaining question
    let next_index = answered_index.map_or(0, |i| i + 1);
    let next = list.get(next_index).cloned();

    let step = if let Some(question) = next {
        session.advance_to(question.clone());
        Step::Next {
            suggestions: catalog.suggestions_for(&question),
            question,
        }
    } else {
        session.finish();
        Step::Exhausted {
            transcript: build_transcript(&session.answers),
        }
    };

    Ok(Advance {
        mentioned,
        policy,
        skipped,
        answered_index,
        next_index,
        step,
    })
}
