//! Fixed user-facing texts

/// Shown when the catalog has no questions
pub const FALLBACK_GREETING: &str =
    "Welcome to the Agricultural Consultation! How can I help you today?";

/// Shown when the catalog could not be read
pub const DEGRADED_GREETING: &str = "Welcome to the Agricultural Consultation! \
     The question database is being set up. How can I help you today?";

/// Shown after a failed step; the caller continues in a fresh session
pub const RESTART_PROMPT: &str = "An error occurred while processing your answer. \
     Let's start over. How can I help you today?";

/// Suggestion pair offered with every fixed prompt
pub const FALLBACK_SUGGESTIONS: [&str; 2] =
    ["I need plant disease advice", "General agricultural advice"];

pub fn fallback_suggestions() -> Vec<String> {
    FALLBACK_SUGGESTIONS.iter().map(|s| (*s).to_string()).collect()
}
