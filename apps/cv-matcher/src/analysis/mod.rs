//! Résumé-vs-job analysis delegated to a language model.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::CvAnalysis;

pub mod analyzer;
pub mod prompts;

pub use analyzer::{AiAnalyzer, AnalyzerSettings};

#[async_trait]
pub trait CvAnalyzer: Send + Sync {
    async fn analyze(&self, cv_text: &str, job_text: &str) -> Result<CvAnalysis, AppError>;
}
