//! API request and response types

use crate::runtime::Reply;
use serde::{Deserialize, Serialize};

/// Request carrying the user's answer to the current question
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    pub user_answer: String,
}

/// Next question, or the diagnosis when `is_final` is set
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionResponse {
    pub session_id: String,
    pub question: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub is_final: bool,
}

impl From<Reply> for QuestionResponse {
    fn from(reply: Reply) -> Self {
        Self {
            session_id: reply.session_id,
            question: reply.question,
            suggestions: reply.suggestions,
            is_final: reply.is_final,
        }
    }
}

/// Response for health checks
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
