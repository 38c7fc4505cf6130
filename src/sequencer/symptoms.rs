//! Symptom matching by exact substring containment

use std::collections::BTreeSet;

/// Trim and lower-case
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Trigger phrases that occur verbatim in the answer, after normalizing both.
pub fn mentioned_symptoms(answer: &str, triggers: &BTreeSet<String>) -> BTreeSet<String> {
    let answer = normalize(answer);
    triggers
        .iter()
        .map(|t| normalize(t))
        .filter(|t| answer.contains(t.as_str()))
        .collect()
}
