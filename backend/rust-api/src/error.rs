use thiserror::Error;

/// Sequencing errors of the per-user question session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session has no current question; initialize() was not called")]
    Uninitialized,
}

#[derive(Debug, Error)]
pub enum QuestionBankError {
    #[error("question bank is empty")]
    Empty,
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse question bank {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the text-generation collaborator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("generation request failed with status {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("prompt was blocked: {0}")]
    Blocked(String),
    #[error("generation returned an empty response")]
    EmptyResponse,
    #[error("{0}")]
    Other(String),
}
