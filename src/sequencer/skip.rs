//! Skip resolution and working-list pruning

use super::symptoms::normalize;
use crate::db::SkipRule;
use std::collections::BTreeSet;

/// Which resolution branch applies. Depends only on how many symptoms
/// were mentioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipPolicy {
    /// Nothing mentioned: no rule fires
    NoMention,
    /// One symptom: skip every rule whose trigger is not exactly it
    SingleExact,
    /// Several symptoms: skip every rule whose trigger contains none of them
    MultiContainment,
}

impl SkipPolicy {
    pub fn for_mentions(mentioned: &BTreeSet<String>) -> Self {
        match mentioned.len() {
            0 => Self::NoMention,
            1 => Self::SingleExact,
            _ => Self::MultiContainment,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoMention => "no_mention",
            Self::SingleExact => "single_exact",
            Self::MultiContainment => "multi_containment",
        }
    }
}

/// Question texts made irrelevant by the mentioned symptoms.
///
/// `_current_question` is where approximate matching against the rules
/// parented on the current question would hook in; exact matching
/// ignores it.
pub fn resolve_skips(
    mentioned: &BTreeSet<String>,
    rules: &[SkipRule],
    _current_question: &str,
) -> BTreeSet<String> {
    match SkipPolicy::for_mentions(mentioned) {
        SkipPolicy::NoMention => BTreeSet::new(),
        SkipPolicy::SingleExact => {
            let only = mentioned.iter().next().map_or("", String::as_str);
            rules
                .iter()
                .filter(|rule| normalize(&rule.trigger_answer) != only)
                .map(|rule| rule.skip_child_text.clone())
                .collect()
        }
        SkipPolicy::MultiContainment => rules
            .iter()
            .filter(|rule| {
                let trigger = normalize(&rule.trigger_answer);
                // Mentioned symptom inside the trigger, not the reverse
                !mentioned.iter().any(|s| trigger.contains(s.as_str()))
            })
            .map(|rule| rule.skip_child_text.clone())
            .collect(),
    }
}

/// Remove skipped texts, keeping the relative order of the rest
pub fn prune(list: &[String], skip: &BTreeSet<String>) -> Vec<String> {
    list.iter().filter(|q| !skip.contains(*q)).cloned().collect()
}
