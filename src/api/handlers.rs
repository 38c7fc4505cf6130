//! HTTP request handlers

use super::types::{AnswerRequest, ErrorResponse, HealthResponse, QuestionResponse};
use super::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/start", get(start_diagnosis))
        .route("/answer", post(process_answer))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Questionnaire
// ============================================================

async fn start_diagnosis(State(state): State<AppState>) -> Json<QuestionResponse> {
    Json(state.service.start().await.into())
}

async fn process_answer(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<QuestionResponse>, AppError> {
    let Json(req) = payload?;
    let Some(session_id) = req.session_id.filter(|id| !id.is_empty()) else {
        return Err(AppError::NotFound("Session not found".to_string()));
    };

    match state.service.answer(&session_id, &req.user_answer).await {
        Ok(reply) => Ok(Json(reply.into())),
        Err(e) if e.is_client_error() => Err(AppError::NotFound(e.to_string())),
        Err(e) => {
            tracing::error!(session_id = %session_id, error = %e, "Answer failed, restarting session");
            Ok(Json(state.service.restart().await.into()))
        }
    }
}

// ============================================================
// Service info
// ============================================================

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        active_sessions: state.service.store().len().await,
    })
}

async fn get_version() -> &'static str {
    concat!("olive-diagnosis ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    InvalidBody(StatusCode, String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidBody(status, msg) => (status, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
