use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lopdf::{Dictionary, Document, Object};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::TextExtractor;

/// Flat key/value view of a PDF's Info dictionary plus its page count.
pub type PdfMetadata = BTreeMap<String, String>;

/// Info dictionary keys we surface, with the name they get in [`PdfMetadata`].
const INFO_FIELDS: [(&[u8], &str); 8] = [
    (b"Title", "title"),
    (b"Author", "author"),
    (b"Subject", "subject"),
    (b"Keywords", "keywords"),
    (b"Creator", "creator"),
    (b"Producer", "producer"),
    (b"CreationDate", "creation_date"),
    (b"ModDate", "modification_date"),
];

/// PDF-backed résumé reader.
///
/// Text goes through `pdf-extract`; metadata goes through `lopdf` directly since
/// `pdf-extract` does not expose the Info dictionary. Both run on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self {
        Self
    }

    /// Best-effort metadata read. Any failure (missing file, wrong extension,
    /// unreadable PDF) yields an empty map instead of an error.
    pub async fn extract_metadata(&self, path: &Path) -> PdfMetadata {
        if let Err(e) = validate_pdf_path(path) {
            debug!("Skipping metadata for {}: {e}", path.display());
            return PdfMetadata::new();
        }

        let owned = path.to_path_buf();
        match tokio::task::spawn_blocking(move || read_metadata(&owned)).await {
            Ok(Ok(metadata)) => metadata,
            Ok(Err(e)) => {
                warn!("Could not read PDF metadata from {}: {e}", path.display());
                PdfMetadata::new()
            }
            Err(e) => {
                warn!("PDF metadata task failed for {}: {e}", path.display());
                PdfMetadata::new()
            }
        }
    }
}

#[async_trait]
impl TextExtractor for PdfParser {
    async fn extract_text(&self, path: &Path) -> Result<String, AppError> {
        validate_pdf_path(path)?;

        info!("Extracting text from {}", path.display());

        let owned = path.to_path_buf();
        // pdf-extract can panic on malformed fonts; the JoinError carries it back here.
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| {
                AppError::PdfExtraction(format!("parser crashed on {}: {e}", path.display()))
            })?
            .map_err(|e| AppError::PdfExtraction(format!("{}: {e}", path.display())))?;

        debug!("Extracted {} characters from {}", text.chars().count(), path.display());
        Ok(text)
    }
}

/// Extension check runs before touching the filesystem.
fn validate_pdf_path(path: &Path) -> Result<(), AppError> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if !is_pdf {
        return Err(AppError::InvalidFormat(format!(
            "File is not a PDF: {}",
            path.display()
        )));
    }

    if !path.exists() {
        return Err(AppError::FileNotFound(PathBuf::from(path)));
    }

    Ok(())
}

fn read_metadata(path: &Path) -> Result<PdfMetadata, lopdf::Error> {
    let doc = Document::load(path)?;
    let mut metadata = PdfMetadata::new();

    if let Some(info) = info_dictionary(&doc) {
        for (key, name) in INFO_FIELDS {
            let value = info
                .get(key)
                .ok()
                .and_then(|obj| obj.as_str().ok())
                .map(decode_pdf_string)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());

            if let Some(value) = value {
                metadata.insert(name.to_string(), value);
            }
        }
    }

    metadata.insert("pages".to_string(), doc.get_pages().len().to_string());
    Ok(metadata)
}

/// The trailer's /Info entry is usually an indirect reference but may be inline.
fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    let info: &Object = match info.as_reference() {
        Ok(id) => doc.get_object(id).ok()?,
        Err(_) => info,
    };
    info.as_dict().ok()
}

/// PDF text strings are either UTF-16BE with a BOM or a single-byte encoding.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // PDFDocEncoding matches Latin-1 for printable characters.
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
