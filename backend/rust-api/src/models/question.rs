use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub hint: String,
}

impl Question {
    pub fn new(text: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: hint.into(),
        }
    }
}

/// Boarding-school interview questions with what the interviewer is really
/// asking. Used when no question file is configured.
pub const BUILTIN_QUESTIONS: &[(&str, &str)] = &[
    (
        "How would your best friend describe you in three words, and why?",
        "💡 **What they are really asking:** Are you self-aware? What role do you play in your peer group? They don't want to hear 'smart' or 'nice'. They want to hear 'loyal', 'analytical', or 'the problem-solver', backed up by a specific story of what you did for your friend.",
    ),
    (
        "If you had a free afternoon with no homework and no screens allowed, what would you do?",
        "💡 **What they are really asking:** Are you intrinsically motivated? Do you have genuine offline hobbies (like reading, building things, or sports)? They want to see intellectual curiosity or passion outside of academics and video games.",
    ),
    (
        "What is something you’ve changed your mind about recently?",
        "💡 **What they are really asking:** Are you open-minded and capable of intellectual growth? It's okay to admit you were wrong about something. Focus on *how* and *why* your perspective shifted based on a new experience.",
    ),
    (
        "Tell me about a time you failed at something or made a mistake. What did you learn?",
        "💡 **What they are really asking:** How resilient are you? Do you blame others, or do you take responsibility? The 'failure' itself matters less than the specific actions you took to fix it and improve.",
    ),
];
