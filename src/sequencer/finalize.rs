//! Transcript assembly and diagnosis composition

use super::session::AnswerRecord;
use crate::classifier::DiseaseInfo;

/// Joins answers into the classifier transcript
pub const TRANSCRIPT_SEPARATOR: &str = "، ";

pub const UNKNOWN_DISEASE: &str = "unknown disease";
pub const NO_SPECIFIC_TREATMENT: &str = "no specific treatment";

/// Concatenate every recorded answer, in order
pub fn build_transcript(answers: &[AnswerRecord]) -> String {
    answers
        .iter()
        .map(|a| a.answer.as_str())
        .collect::<Vec<_>>()
        .join(TRANSCRIPT_SEPARATOR)
}

/// Final diagnosis shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    pub name: String,
    pub treatment: String,
}

impl Diagnosis {
    /// Placeholders stand in for a missing entry or a missing field
    pub fn from_lookup(info: Option<DiseaseInfo>) -> Self {
        let info = info.unwrap_or_default();
        Self {
            name: info.name.unwrap_or_else(|| UNKNOWN_DISEASE.to_string()),
            treatment: info
                .treatment
                .unwrap_or_else(|| NO_SPECIFIC_TREATMENT.to_string()),
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Diagnosis result: {}\nSuggested treatment: {}",
            self.name, self.treatment
        )
    }
}
