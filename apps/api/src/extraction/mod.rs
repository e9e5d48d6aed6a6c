//! Turns uploaded resume bytes into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default `DocumentExtractor`
//! sniffs the upload and dispatches to PDF parsing, OCR, or UTF-8 decoding.
//! PDFs without a text layer are rendered page by page and OCR'd.
//! A failed extraction must stop the request before any scoring runs.

pub mod ocr;
pub mod pdf;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::extraction::ocr::ImageFormat;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("uploaded document is empty")]
    Empty,

    #[error("unsupported document format (expected PDF, image, or UTF-8 text)")]
    UnsupportedFormat,

    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("no readable text found in document")]
    NoText,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    /// Diagnostic surfaced to the user verbatim when extraction fails.
    pub fn diagnostic(&self) -> String {
        format!("[ERROR] Unable to extract resume text: {self}")
    }
}

/// What kind of document the text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Image,
    PlainText,
}

#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub kind: DocumentKind,
}

/// Pluggable extraction backend. Carried in `AppState` as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError>;
}

/// Detected upload format, decided from magic bytes rather than the client's filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedFormat {
    Pdf,
    Image(ImageFormat),
    Utf8Text,
    Unknown,
}

pub fn sniff_format(bytes: &[u8]) -> SniffedFormat {
    if bytes.starts_with(b"%PDF-") {
        return SniffedFormat::Pdf;
    }
    if let Some(format) = ImageFormat::detect(bytes) {
        return SniffedFormat::Image(format);
    }
    if std::str::from_utf8(bytes).is_ok() {
        return SniffedFormat::Utf8Text;
    }
    SniffedFormat::Unknown
}

/// Default extractor: PDF text layer (page OCR when it is blank), Tesseract OCR for
/// images, raw UTF-8 otherwise.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    tesseract_bin: PathBuf,
    pdftoppm_bin: PathBuf,
}

impl DocumentExtractor {
    pub fn new(tesseract_bin: impl Into<PathBuf>, pdftoppm_bin: impl Into<PathBuf>) -> Self {
        Self {
            tesseract_bin: tesseract_bin.into(),
            pdftoppm_bin: pdftoppm_bin.into(),
        }
    }

    async fn extract_pdf(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = pdf::extract_pdf_text(bytes).await?;
        if !text.trim().is_empty() {
            return Ok(text);
        }

        info!("PDF has no text layer, falling back to page OCR");
        pdf::ocr_pdf_pages(&self.pdftoppm_bin, &self.tesseract_bin, bytes).await
    }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let format = sniff_format(bytes);
        debug!(?format, size = bytes.len(), "Extracting resume text");

        let (text, kind) = match format {
            SniffedFormat::Pdf => (self.extract_pdf(bytes).await?, DocumentKind::Pdf),
            SniffedFormat::Image(image) => (
                ocr::run_tesseract(&self.tesseract_bin, bytes, image).await?,
                DocumentKind::Image,
            ),
            SniffedFormat::Utf8Text => (
                String::from_utf8_lossy(bytes).into_owned(),
                DocumentKind::PlainText,
            ),
            SniffedFormat::Unknown => return Err(ExtractionError::UnsupportedFormat),
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        info!(?kind, chars = text.len(), "Resume text extracted");
        Ok(ExtractedText { text, kind })
    }
}
