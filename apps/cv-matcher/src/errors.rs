use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type shared by every pipeline step.
/// The CLI maps it to an exit code via [`AppError::exit_code`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit code for the CLI.
    /// 2 = bad input, 3 = configuration/credentials, 4 = remote failure, 1 = anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::FileNotFound(_)
            | AppError::InvalidFormat(_)
            | AppError::PdfExtraction(_)
            | AppError::Validation(_) => 2,
            AppError::Config(_) | AppError::Authentication(_) => 3,
            AppError::Fetch(_) | AppError::Llm(_) | AppError::Parse(_) => 4,
            AppError::Internal(_) => 1,
        }
    }
}
