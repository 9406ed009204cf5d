pub mod feedback;
pub mod question;
pub mod session;

pub use feedback::{
    FeedbackOutcome, FeedbackResponse, FeedbackStatus, SubmitAnswerRequest, SESSION_EXPIRED_MESSAGE,
};
pub use question::Question;
pub use session::SessionResponse;
