//! Text extraction for page-based documents.

use async_trait::async_trait;

use super::source::decode_text;
use super::IngestError;

/// Trait for turning document bytes into plain text.
///
/// Extraction is the only suspension point of a planning run; files are
/// extracted one after another in upload order.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the text layer of a document.
    async fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError>;
}

/// Extractor for content that is already plain text.
///
/// Useful when an upstream service has done the PDF extraction, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError> {
        Ok(decode_text(bytes))
    }
}

/// PDF text extractor backed by `pdf-extract`.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[cfg(feature = "pdf")]
#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: &[u8]) -> Result<String, IngestError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| IngestError::Extraction(e.to_string()))?;
        tracing::debug!(bytes = bytes.len(), chars = text.len(), "Extracted PDF text layer");
        Ok(decode_text(text.as_bytes()))
    }
}
