use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use super::{session_id, with_session_cookie, ApiError};
use crate::{
    models::{FeedbackOutcome, SESSION_EXPIRED_MESSAGE},
    render::{render_page, Notice, PageView},
    services::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
}

/// GET / - the practice page
pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.sessions.open(session_id(&jar))?;
    let jar = with_session_cookie(jar, &snapshot, &state);

    let html = render_page(&PageView {
        question: &snapshot.question,
        answer: "",
        notice: None,
    });
    Ok((jar, Html(html)))
}

/// POST /shuffle - new question, then back to the page
pub async fn shuffle(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.sessions.reselect(session_id(&jar))?;
    let jar = with_session_cookie(jar, &snapshot, &state);
    Ok((jar, Redirect::to("/")))
}

/// POST /feedback - evaluate the answer and render the page with the result
pub async fn feedback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<AnswerForm>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.sessions.open(session_id(&jar))?;
    let jar = with_session_cookie(jar, &snapshot, &state);

    let notice = if snapshot.created {
        Notice::Info(SESSION_EXPIRED_MESSAGE.to_string())
    } else {
        match state
            .feedback
            .submit_answer(&snapshot.question, &form.answer)
            .await
        {
            FeedbackOutcome::Feedback(text) => Notice::Feedback(text),
            FeedbackOutcome::ValidationRejected { message } => Notice::Warning(message),
            FeedbackOutcome::ExternalCallFailure { message } => Notice::Error(message),
        }
    };

    let html = render_page(&PageView {
        question: &snapshot.question,
        answer: &form.answer,
        notice: Some(notice),
    });
    Ok((jar, Html(html)))
}
