use anyhow::Context;
use std::sync::Arc;

use crate::config::Config;

pub mod feedback_service;
pub mod gemini_client;
pub mod question_bank;
pub mod session_service;
pub mod session_sweeper;

use feedback_service::FeedbackService;
use gemini_client::{GeminiClient, TextGenerator};
use question_bank::{QuestionBank, QuestionChooser, UniformChooser};
use session_service::SessionStore;

pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub feedback: FeedbackService,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let bank = match &config.questions_path {
            Some(path) => {
                let bank = QuestionBank::from_json_file(path)
                    .with_context(|| format!("Failed to load question bank from {}", path))?;
                tracing::info!("Loaded {} questions from {}", bank.len(), path);
                bank
            }
            None => QuestionBank::builtin(),
        };

        let generator = Arc::new(GeminiClient::new(
            config.gemini_base_url.clone(),
            config.google_api_key.clone(),
        ));

        tracing::info!(
            "Feedback collaborator: model={}, base_url={}",
            config.gemini_model,
            config.gemini_base_url
        );

        Ok(Self::with_parts(
            config,
            bank,
            Arc::new(UniformChooser),
            generator,
        ))
    }

    /// Builds state from explicit collaborators; tests pass doubles here.
    pub fn with_parts(
        config: Config,
        bank: QuestionBank,
        chooser: Arc<dyn QuestionChooser>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let sessions = SessionStore::new(Arc::new(bank), chooser, config.session_ttl_seconds);
        let feedback = FeedbackService::new(
            generator,
            config.gemini_model.clone(),
            config.min_answer_chars,
        );

        Self {
            config,
            sessions,
            feedback,
        }
    }
}
