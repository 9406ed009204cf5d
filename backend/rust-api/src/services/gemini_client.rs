use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Narrow contract to the external text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model_id: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// Google Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, model_id: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model_id
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, model_id: &str, prompt: &str) -> Result<String, GenerationError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(model_id))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status,
                message: api_error_message(&body),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_text(body)
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(body: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Blocked(reason));
    }

    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .and_then(|error| error.message)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no error details".to_string()
            } else {
                trimmed.chars().take(500).collect()
            }
        })
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_endpoint_format() {
        let client = GeminiClient::new("https://example.test/v1beta/", "key");
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_text_joins_parts_of_first_candidate() {
        let body = parse(
            r####"{"candidates": [
                {"content": {"parts": [{"text": "### 📊 Coach's Evaluation\n"}, {"text": "Score: 6/10"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"####,
        );
        assert_eq!(
            extract_text(body).unwrap(),
            "### 📊 Coach's Evaluation\nScore: 6/10"
        );
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let body = parse(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#);
        match extract_text(body) {
            Err(GenerationError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let body = parse(r#"{"candidates": []}"#);
        assert!(matches!(
            extract_text(body),
            Err(GenerationError::EmptyResponse)
        ));
    }

    #[test]
    fn test_api_error_message_from_envelope() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted (e.g. check quota).", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            api_error_message(body),
            "Resource has been exhausted (e.g. check quota)."
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(api_error_message(""), "no error details");
    }
}
