#![allow(dead_code)]

use admissions_coach::{
    config::Config,
    create_router,
    error::GenerationError,
    services::{
        gemini_client::TextGenerator,
        question_bank::{QuestionBank, QuestionChooser},
        AppState,
    },
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const LONG_ANSWER: &str = "a string of at least fifteen characters";

/// Collaborator double: fixed reply or fixed error, records every prompt.
pub struct StubGenerator {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _model_id: &str, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(GenerationError::Other)
    }
}

/// Returns scripted indices in order, then cycles through them again.
pub struct ScriptedChooser {
    picks: Vec<usize>,
    next: AtomicUsize,
}

impl ScriptedChooser {
    pub fn new(picks: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            picks: picks.to_vec(),
            next: AtomicUsize::new(0),
        })
    }
}

impl QuestionChooser for ScriptedChooser {
    fn choose(&self, _len: usize) -> usize {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.picks[i % self.picks.len()]
    }
}

pub fn test_config() -> Config {
    let mut config = Config::with_api_key("test-key");
    config.metrics_auth = "metrics:secret".to_string();
    config
}

pub fn create_test_app(
    generator: Arc<StubGenerator>,
    picks: &[usize],
) -> (Router, Arc<AppState>) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let state = Arc::new(AppState::with_parts(
        test_config(),
        QuestionBank::builtin(),
        ScriptedChooser::new(picks),
        generator,
    ));
    (create_router(state.clone()), state)
}

/// `name=value` of the session cookie set by a response.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("coach_session="))
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.to_string())
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
