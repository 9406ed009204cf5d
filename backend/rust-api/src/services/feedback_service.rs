use std::sync::Arc;
use std::time::Instant;

use crate::metrics::{FEEDBACK_REQUESTS_TOTAL, GENERATION_DURATION_SECONDS};
use crate::models::{FeedbackOutcome, Question};
use crate::services::gemini_client::TextGenerator;

pub const TOO_SHORT_MESSAGE: &str =
    "Please provide a little more detail (at least a sentence or two) so I can help you expand it!";

/// Validates answers, asks the collaborator for coaching and passes its text
/// through untouched.
pub struct FeedbackService {
    generator: Arc<dyn TextGenerator>,
    model_id: String,
    min_answer_chars: usize,
}

impl FeedbackService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        model_id: impl Into<String>,
        min_answer_chars: usize,
    ) -> Self {
        Self {
            generator,
            model_id: model_id.into(),
            min_answer_chars,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn min_answer_chars(&self) -> usize {
        self.min_answer_chars
    }

    pub async fn submit_answer(&self, question: &Question, answer_text: &str) -> FeedbackOutcome {
        let outcome = self.evaluate(question, answer_text).await;
        FEEDBACK_REQUESTS_TOTAL
            .with_label_values(&[outcome.status().as_str()])
            .inc();
        outcome
    }

    async fn evaluate(&self, question: &Question, answer_text: &str) -> FeedbackOutcome {
        let length = answer_text.trim().chars().count();
        if length < self.min_answer_chars {
            tracing::debug!(
                "Answer rejected: {} chars, minimum {}",
                length,
                self.min_answer_chars
            );
            return FeedbackOutcome::ValidationRejected {
                message: TOO_SHORT_MESSAGE.to_string(),
            };
        }

        let prompt = build_prompt(&question.text, answer_text);

        tracing::info!(
            "Requesting feedback from model={} (answer {} chars)",
            self.model_id,
            length
        );

        let start = Instant::now();
        let result = self.generator.generate(&self.model_id, &prompt).await;
        let elapsed = start.elapsed().as_secs_f64();

        let status = if result.is_ok() { "success" } else { "error" };
        GENERATION_DURATION_SECONDS
            .with_label_values(&[status])
            .observe(elapsed);

        match result {
            Ok(text) => {
                tracing::info!("Feedback received in {:.2}s", elapsed);
                FeedbackOutcome::Feedback(text)
            }
            Err(e) => {
                tracing::error!("Feedback generation failed: {}", e);
                FeedbackOutcome::ExternalCallFailure {
                    message: format!("An error occurred: {}", e),
                }
            }
        }
    }
}

/// Coaching instructions with the question and answer inserted verbatim.
pub fn build_prompt(question_text: &str, answer_text: &str) -> String {
    format!(
        r#"
You are an elite US Boarding School Admissions Coach. You are tough but deeply encouraging.
A 14-year-old applicant answered this question:
Question: "{question_text}"
Applicant's Answer: "{answer_text}"

Evaluate this and guide them to a better answer. Format exactly as follows:

### 📊 Coach's Evaluation

**1. Authenticity & Depth (Score: X/10):**
*Feedback:* Be honest about whether this sounds like a real, specific teenager or a generic template. Point out if it lacks a personal story ("Show, don't tell").

**2. The Missed Opportunity:**
*Feedback:* What is the core weakness of this answer? (e.g., "You stated a fact, but didn't explain the *why* behind it.")

### 🧠 Let's Brainstorm (How to fix it)
To make this answer unforgettable, ask yourself these 3 questions. Try to rewrite your answer by picking ONE of these to focus on:
* [Ask a specific, guiding question to help them dig into their memory, e.g., "Think about your sports or hobbies. Was there ever a time when...?"]
* [Ask a second guiding question focusing on a personal struggle or detail.]
* [Ask a third guiding question focusing on their impact on others or intellectual curiosity.]
"#
    )
}
