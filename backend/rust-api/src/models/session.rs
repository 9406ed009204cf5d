use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::Question;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub question: Question,
    pub expires_at: DateTime<Utc>,
}
