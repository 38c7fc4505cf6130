//! Adaptive question sequencer
//!
//! Pure, synchronous core: symptom matching, skip resolution and the
//! per-answer step over an explicit [`Session`] record. All I/O (catalog
//! reads, classification, session storage) lives in `runtime`.

mod catalog;
pub mod finalize;
pub mod prompts;
mod session;
pub mod skip;
mod step;
pub mod symptoms;

#[cfg(test)]
mod proptests;

pub use catalog::Catalog;
pub use finalize::{build_transcript, Diagnosis};
pub use session::{AnswerRecord, Session, SessionPhase};
pub use skip::{prune, resolve_skips, SkipPolicy};
pub use step::{advance, Advance, Step, StepError};
pub use symptoms::mentioned_symptoms;
