use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::analysis::prompts::{analysis_system_prompt, build_analysis_prompt};
use crate::analysis::CvAnalyzer;
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::CvAnalysis;

/// Upper bound on characters of each input sent to the model.
pub const MAX_INPUT_CHARS: usize = 12_000;

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl AnalyzerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }
}

/// Language-model backed [`CvAnalyzer`]. One LLM call per analysis, no retry.
#[derive(Debug, Clone)]
pub struct AiAnalyzer {
    llm: LlmClient,
}

impl AiAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Result<Self, AppError> {
        let api_key = settings
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Authentication("no OpenAI API key configured".to_string()))?;

        let llm = LlmClient::new(api_key, settings.base_url, settings.model, settings.timeout)?;
        Ok(Self { llm })
    }

    pub fn with_client(llm: LlmClient) -> Self {
        Self { llm }
    }

    pub fn api_key(&self) -> &str {
        self.llm.api_key()
    }

    pub fn model(&self) -> &str {
        self.llm.model()
    }
}

#[async_trait]
impl CvAnalyzer for AiAnalyzer {
    async fn analyze(&self, cv_text: &str, job_text: &str) -> Result<CvAnalysis, AppError> {
        if cv_text.trim().is_empty() {
            return Err(AppError::Validation(
                "résumé has no extractable text (scanned PDFs need OCR first)".to_string(),
            ));
        }
        if job_text.trim().is_empty() {
            return Err(AppError::Validation(
                "job description is empty".to_string(),
            ));
        }

        let cv_text = truncate_input("résumé", cv_text);
        let job_text = truncate_input("job description", job_text);

        info!("Requesting analysis from model {}", self.llm.model());

        let prompt = build_analysis_prompt(cv_text, job_text);
        let analysis: CvAnalysis = self
            .llm
            .call_json(&prompt, &analysis_system_prompt())
            .await
            .map_err(map_llm_error)?;

        validate_analysis(&analysis)?;

        info!(
            "Analysis complete: overall score {:.1}",
            analysis.match_score.overall_score
        );
        Ok(analysis)
    }
}

fn truncate_input<'a>(label: &str, text: &'a str) -> &'a str {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((cut, _)) => {
            warn!("Truncating {label} to {MAX_INPUT_CHARS} characters");
            &text[..cut]
        }
        None => text,
    }
}

fn map_llm_error(err: LlmError) -> AppError {
    match err {
        LlmError::Api { status, message } if status == 401 || status == 403 => {
            AppError::Authentication(format!("LLM API rejected credentials: {message}"))
        }
        LlmError::Parse(e) => {
            AppError::Parse(format!("model reply does not match the analysis schema: {e}"))
        }
        LlmError::EmptyContent => AppError::Parse("model returned an empty reply".to_string()),
        other => AppError::Llm(other.to_string()),
    }
}

fn validate_analysis(analysis: &CvAnalysis) -> Result<(), AppError> {
    match analysis.match_score.first_out_of_range() {
        Some((label, value)) => Err(AppError::Parse(format!(
            "{label} score {value} is outside 0-100"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{local_client, serve_once};
    use serde_json::json;

    fn analyzer_for(base: &str) -> AiAnalyzer {
        AiAnalyzer::with_client(LlmClient::with_client(
            local_client(),
            "sk-test".to_string(),
            base.to_string(),
            "gpt-test".to_string(),
        ))
    }

    fn reply(content: serde_json::Value) -> String {
        json!({"choices": [{"message": {"content": content.to_string()}}]}).to_string()
    }

    fn analysis_json(overall: f64) -> serde_json::Value {
        json!({
            "match_score": {
                "overall_score": overall,
                "skills_match": 80,
                "experience_match": 70,
                "education_match": 65,
                "keywords_match": 85
            },
            "formatting_advice": {
                "strengths": ["Good"],
                "weaknesses": ["Improve"],
                "suggestions": ["Add more"]
            },
            "summary": "Good match",
            "recommendation": "Apply"
        })
    }

    fn settings(api_key: Option<&str>) -> AnalyzerSettings {
        AnalyzerSettings {
            api_key: api_key.map(str::to_string),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_new_without_key_is_authentication_error() {
        let err = AiAnalyzer::new(settings(None)).unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));

        let err = AiAnalyzer::new(settings(Some("  "))).unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn test_new_keeps_key_and_model() {
        let analyzer = AiAnalyzer::new(settings(Some("test-key"))).unwrap();
        assert_eq!(analyzer.api_key(), "test-key");
        assert_eq!(analyzer.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            openai_api_key: Some("k".to_string()),
            llm_timeout_secs: 7,
            ..Config::default()
        };
        let settings = AnalyzerSettings::from_config(&config);
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_eq!(settings.timeout, Duration::from_secs(7));
        assert_eq!(settings.model, config.openai_model);
    }

    #[test]
    fn test_truncate_input_respects_char_boundaries() {
        let long = "é".repeat(MAX_INPUT_CHARS + 10);
        let cut = truncate_input("test", &long);
        assert_eq!(cut.chars().count(), MAX_INPUT_CHARS);

        assert_eq!(truncate_input("test", "short"), "short");
    }

    #[tokio::test]
    async fn test_parses_structured_reply() {
        let (base, server) =
            serve_once(200, "application/json", &reply(analysis_json(75.0))).await;

        let analysis = analyzer_for(&base)
            .analyze("CV content", "Job description")
            .await
            .unwrap();
        assert_eq!(analysis.match_score.overall_score, 75.0);
        assert_eq!(analysis.match_score.skills_match, 80.0);
        assert_eq!(analysis.formatting_advice.suggestions, vec!["Add more"]);
        assert_eq!(analysis.summary, "Good match");
        assert_eq!(analysis.recommendation, "Apply");

        let request = server.await.unwrap();
        assert!(request.contains("CV content"));
        assert!(request.contains("Job description"));
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_parse_error() {
        let (base, _server) =
            serve_once(200, "application/json", &reply(analysis_json(140.0))).await;

        let err = analyzer_for(&base).analyze("cv", "job").await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)), "got {err:?}");
        assert!(err.to_string().contains("Overall"));
    }

    #[tokio::test]
    async fn test_missing_field_is_parse_error() {
        let mut content = analysis_json(50.0);
        content.as_object_mut().unwrap().remove("summary");
        let (base, _server) = serve_once(200, "application/json", &reply(content)).await;

        let err = analyzer_for(&base).analyze("cv", "job").await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_prose_reply_is_parse_error() {
        let body = json!({"choices": [{"message": {"content": "Looks like a decent fit!"}}]})
            .to_string();
        let (base, _server) = serve_once(200, "application/json", &body).await;

        let err = analyzer_for(&base).analyze("cv", "job").await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_parse_error() {
        let (base, _server) = serve_once(200, "application/json", "{\"id\": \"chatcmpl-1\"}").await;

        let err = analyzer_for(&base).analyze("cv", "job").await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_rejected_key_is_authentication_error() {
        let body = json!({"error": {"message": "Incorrect API key provided"}}).to_string();
        let (base, _server) = serve_once(401, "application/json", &body).await;

        let err = analyzer_for(&base).analyze("cv", "job").await.unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_server_error_is_llm_error() {
        let (base, _server) = serve_once(500, "text/plain", "upstream down").await;

        let err = analyzer_for(&base).analyze("cv", "job").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)), "got {err:?}");
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn test_blank_cv_fails_before_any_request() {
        // Port 9 (discard) is never contacted: validation runs first.
        let err = analyzer_for("http://127.0.0.1:9")
            .analyze("   \n", "job")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
