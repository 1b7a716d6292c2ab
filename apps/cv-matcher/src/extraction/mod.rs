//! Résumé text extraction.
//!
//! The orchestrator depends on the `TextExtractor` trait only; `PdfParser` is the
//! production implementation.

use std::path::Path;

use async_trait::async_trait;

use crate::errors::AppError;

pub mod pdf_parser;

pub use pdf_parser::{PdfMetadata, PdfParser};

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, path: &Path) -> Result<String, AppError>;
}
