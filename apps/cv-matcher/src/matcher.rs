//! CvMatcher: the extract → fetch → analyze pipeline.
//!
//! Each step is awaited before the next one starts and the first error ends the run.
//! The three steps are traits so any of them can be swapped out; the production
//! implementations are the default type parameters.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::analysis::{AiAnalyzer, AnalyzerSettings, CvAnalyzer};
use crate::config::{Config, API_KEY_ENV};
use crate::errors::AppError;
use crate::extraction::{PdfParser, TextExtractor};
use crate::fetcher::{JobDescriptionFetcher, JobSource};
use crate::models::{CvAnalysis, ScoreColor};

pub struct CvMatcher<E = PdfParser, F = JobDescriptionFetcher, A = AiAnalyzer> {
    extractor: E,
    fetcher: F,
    analyzer: A,
}

impl CvMatcher {
    /// Builds the production pipeline. The API key must already be resolved into
    /// `config` (from a CLI flag or the environment) by the caller.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let has_key = config
            .openai_api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false);

        if !has_key {
            return Err(AppError::Config(format!(
                "OpenAI API key is required. Pass --api-key or set {API_KEY_ENV}."
            )));
        }

        let analyzer = AiAnalyzer::new(AnalyzerSettings::from_config(config))?;
        let fetcher = JobDescriptionFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;

        Ok(Self::with_components(PdfParser::new(), fetcher, analyzer))
    }
}

impl<E, F, A> CvMatcher<E, F, A>
where
    E: TextExtractor,
    F: JobSource,
    A: CvAnalyzer,
{
    pub fn with_components(extractor: E, fetcher: F, analyzer: A) -> Self {
        Self {
            extractor,
            fetcher,
            analyzer,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Runs the full pipeline for one résumé and one job description (URL or text).
    pub async fn analyze_cv(
        &self,
        pdf_path: impl AsRef<Path>,
        job_description: &str,
    ) -> Result<CvAnalysis, AppError> {
        let pdf_path = pdf_path.as_ref();
        let started = Instant::now();

        info!("Analyzing résumé {}", pdf_path.display());

        let cv_text = self.extractor.extract_text(pdf_path).await?;
        debug!("Résumé text: {} characters", cv_text.chars().count());

        let job_text = self.fetcher.fetch(job_description).await?;
        debug!("Job description: {} characters", job_text.chars().count());

        let analysis = self.analyzer.analyze(&cv_text, &job_text).await?;

        info!(
            "Finished in {:.1}s: overall {:.1} ({})",
            started.elapsed().as_secs_f64(),
            analysis.match_score.overall_score,
            score_color(analysis.match_score.overall_score)
        );
        Ok(analysis)
    }

    pub fn score_color(&self, score: f64) -> ScoreColor {
        score_color(score)
    }
}

/// Maps a 0–100 score to its display color.
pub fn score_color(score: f64) -> ScoreColor {
    ScoreColor::for_score(score)
}
