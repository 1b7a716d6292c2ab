//! Résumé-to-job matching: extract a PDF résumé, resolve the job description,
//! and have a language model score the fit.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod fetcher;
pub mod llm_client;
pub mod matcher;
pub mod models;
pub mod output;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use errors::AppError;
pub use matcher::{score_color, CvMatcher};
pub use models::{CvAnalysis, FormattingAdvice, MatchScore, ScoreColor};
