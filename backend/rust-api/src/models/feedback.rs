use serde::{Deserialize, Serialize};

use super::question::Question;

pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired. A new question was selected, please answer it.";

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

/// Result of one feedback request. Validation and collaborator failures are
/// outcomes the user sees, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Raw collaborator text, passed through unparsed.
    Feedback(String),
    ValidationRejected { message: String },
    ExternalCallFailure { message: String },
}

impl FeedbackOutcome {
    pub fn status(&self) -> FeedbackStatus {
        match self {
            FeedbackOutcome::Feedback(_) => FeedbackStatus::Feedback,
            FeedbackOutcome::ValidationRejected { .. } => FeedbackStatus::ValidationRejected,
            FeedbackOutcome::ExternalCallFailure { .. } => FeedbackStatus::ExternalCallFailure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Feedback,
    ValidationRejected,
    ExternalCallFailure,
    /// The answer arrived without a live session and was not evaluated.
    SessionExpired,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Feedback => "feedback",
            FeedbackStatus::ValidationRejected => "validation_rejected",
            FeedbackStatus::ExternalCallFailure => "external_call_failure",
            FeedbackStatus::SessionExpired => "session_expired",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub status: FeedbackStatus,
    pub question: Question,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FeedbackResponse {
    pub fn new(question: Question, outcome: FeedbackOutcome) -> Self {
        let status = outcome.status();
        let (feedback, message) = match outcome {
            FeedbackOutcome::Feedback(text) => (Some(text), None),
            FeedbackOutcome::ValidationRejected { message }
            | FeedbackOutcome::ExternalCallFailure { message } => (None, Some(message)),
        };
        Self {
            status,
            question,
            feedback,
            message,
        }
    }

    /// Reply for an answer that had no live session behind it.
    pub fn session_expired(question: Question) -> Self {
        Self {
            status: FeedbackStatus::SessionExpired,
            question,
            feedback: None,
            message: Some(SESSION_EXPIRED_MESSAGE.to_string()),
        }
    }
}
