use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use super::{session_id, with_session_cookie, ApiError};
use crate::{
    extractors::AppJson,
    models::{FeedbackResponse, FeedbackStatus, SessionResponse, SubmitAnswerRequest},
    services::{session_service::SessionSnapshot, AppState},
};

/// GET /api/v1/session - current question, creating the session if needed
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.sessions.open(session_id(&jar))?;
    let jar = with_session_cookie(jar, &snapshot, &state);
    Ok((jar, Json(session_response(snapshot))))
}

/// POST /api/v1/session/shuffle - draw a new question
pub async fn shuffle_question(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.sessions.reselect(session_id(&jar))?;
    tracing::info!("Question shuffled for session {}", snapshot.id);
    let jar = with_session_cookie(jar, &snapshot, &state);
    Ok((jar, Json(session_response(snapshot))))
}

/// POST /api/v1/session/answers - coaching feedback for the current question
pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppJson(req): AppJson<SubmitAnswerRequest>,
) -> Result<Response, ApiError> {
    let snapshot = state.sessions.open(session_id(&jar))?;
    let jar = with_session_cookie(jar, &snapshot, &state);

    // The answer belongs to a question this session never showed
    if snapshot.created {
        tracing::warn!(
            "Answer submitted without a live session; issued new session {}",
            snapshot.id
        );
        return Ok((
            StatusCode::CONFLICT,
            jar,
            Json(FeedbackResponse::session_expired(snapshot.question)),
        )
            .into_response());
    }

    tracing::info!("Submitting answer for session: {}", snapshot.id);

    let outcome = state
        .feedback
        .submit_answer(&snapshot.question, &req.answer)
        .await;

    let status = match outcome.status() {
        FeedbackStatus::Feedback => StatusCode::OK,
        FeedbackStatus::ValidationRejected => StatusCode::UNPROCESSABLE_ENTITY,
        FeedbackStatus::ExternalCallFailure => StatusCode::BAD_GATEWAY,
        FeedbackStatus::SessionExpired => StatusCode::CONFLICT,
    };

    Ok((
        status,
        jar,
        Json(FeedbackResponse::new(snapshot.question, outcome)),
    )
        .into_response())
}

fn session_response(snapshot: SessionSnapshot) -> SessionResponse {
    SessionResponse {
        session_id: snapshot.id.to_string(),
        question: snapshot.question,
        expires_at: snapshot.expires_at,
    }
}
