use crate::errors::AppError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Name of the single environment variable the API key is read from.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Runtime configuration. The library never reads the environment itself;
/// the CLI calls [`Config::from_env`] once and passes the result down.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            openai_api_key: get(API_KEY_ENV),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            llm_timeout_secs: parse_secs(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
            fetch_timeout_secs: parse_secs(get("FETCH_TIMEOUT_SECS"), "FETCH_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Applies CLI overrides on top of the environment-derived values.
    pub fn with_overrides(mut self, api_key: Option<String>, model: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.openai_api_key = Some(key);
        }
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.openai_model = model;
        }
        self
    }
}

/// Parses a timeout in seconds. Zero is rejected since every request would time out.
fn parse_secs(value: Option<String>, key: &str) -> Result<Option<u64>, AppError> {
    value
        .map(|v| match v.trim().parse::<u64>() {
            Ok(0) => Err(AppError::Config(format!(
                "{key} must be at least 1 second, got '{v}'"
            ))),
            Ok(secs) => Ok(secs),
            Err(_) => Err(AppError::Config(format!(
                "{key} must be a whole number of seconds, got '{v}'"
            ))),
        })
        .transpose()
}
