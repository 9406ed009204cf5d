use serde::Deserialize;
use std::env;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";

/// Minimum trimmed answer length accepted for feedback. Tunable, not derived.
pub const DEFAULT_MIN_ANSWER_CHARS: usize = 15;
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 3600;
/// Upper bound on the idle session lifetime (30 days).
pub const MAX_SESSION_TTL_SECONDS: i64 = 30 * 24 * 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub bind_addr: String,
    pub min_answer_chars: usize,
    pub session_ttl_seconds: i64,
    pub cookie_secure: bool,
    pub questions_path: Option<String>,
    pub metrics_auth: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Root .env first, then the local one
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/*.toml + ENV overrides (prefix: APP_)
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let google_api_key = settings
            .get_string("gemini.api_key")
            .or_else(|_| env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| config::ConfigError::NotFound("GOOGLE_API_KEY".to_string()))?;

        let gemini_model = settings
            .get_string("gemini.model")
            .or_else(|_| env::var("GEMINI_MODEL"))
            .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let gemini_base_url = settings
            .get_string("gemini.base_url")
            .or_else(|_| env::var("GEMINI_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string());

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let min_answer_chars = match settings.get_int("feedback.min_answer_chars") {
            Ok(value) if value >= 0 => value as usize,
            Ok(value) => {
                return Err(config::ConfigError::Message(format!(
                    "feedback.min_answer_chars must not be negative (got {})",
                    value
                )))
            }
            Err(_) => DEFAULT_MIN_ANSWER_CHARS,
        };

        let session_ttl_seconds = settings
            .get_int("session.ttl_seconds")
            .ok()
            .or_else(|| {
                env::var("SESSION_DURATION_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok())
            })
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_SECONDS);
        if session_ttl_seconds > MAX_SESSION_TTL_SECONDS {
            return Err(config::ConfigError::Message(format!(
                "session.ttl_seconds must be at most {} (got {})",
                MAX_SESSION_TTL_SECONDS, session_ttl_seconds
            )));
        }

        let cookie_secure = settings
            .get_bool("session.cookie_secure")
            .unwrap_or(env == "prod");

        let questions_path = settings
            .get_string("questions.path")
            .or_else(|_| env::var("QUESTIONS_PATH"))
            .ok();

        let metrics_auth = settings
            .get_string("metrics.auth")
            .or_else(|_| env::var("METRICS_AUTH"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    eprintln!("WARNING: METRICS_AUTH not set, /metrics uses default credentials");
                }
                "admin:changeme".to_string()
            });

        Ok(Config {
            google_api_key,
            gemini_model,
            gemini_base_url,
            bind_addr,
            min_answer_chars,
            session_ttl_seconds,
            cookie_secure,
            questions_path,
            metrics_auth,
        })
    }

    /// Config with defaults for everything except the API key.
    pub fn with_api_key(google_api_key: impl Into<String>) -> Self {
        Config {
            google_api_key: google_api_key.into(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            min_answer_chars: DEFAULT_MIN_ANSWER_CHARS,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: false,
            questions_path: None,
            metrics_auth: "admin:changeme".to_string(),
        }
    }
}
