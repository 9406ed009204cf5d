use rand::Rng;
use std::path::Path;

use crate::error::QuestionBankError;
use crate::models::question::{Question, BUILTIN_QUESTIONS};

/// Picks an index in `0..len`. `len` is never zero.
pub trait QuestionChooser: Send + Sync {
    fn choose(&self, len: usize) -> usize;
}

/// Uniform draw from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformChooser;

impl QuestionChooser for UniformChooser {
    fn choose(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Fixed, non-empty, ordered question collection. Never mutated after start.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        Ok(Self { questions })
    }

    pub fn builtin() -> Self {
        Self {
            questions: BUILTIN_QUESTIONS
                .iter()
                .map(|(text, hint)| Question::new(*text, *hint))
                .collect(),
        }
    }

    /// Loads `[{"text": ..., "hint": ...}]` from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, QuestionBankError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| QuestionBankError::Io {
            path: display.clone(),
            source,
        })?;
        let questions: Vec<Question> =
            serde_json::from_str(&raw).map_err(|source| QuestionBankError::Parse {
                path: display,
                source,
            })?;
        Self::new(questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn contains(&self, question: &Question) -> bool {
        self.questions.iter().any(|q| q == question)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Draws an index through `chooser`, clamped into range.
    pub fn pick(&self, chooser: &dyn QuestionChooser) -> usize {
        chooser.choose(self.questions.len()) % self.questions.len()
    }
}
