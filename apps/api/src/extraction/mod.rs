//! PDF → text extraction and upload validation.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

/// Uploads larger than this are rejected unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Extracted text shorter than this (after trimming) is treated as unreadable.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Please upload a PDF file")]
    NotPdf,

    #[error("File size must be less than {limit_mb}MB")]
    TooLarge { limit_mb: usize },

    #[error("Failed to parse PDF. Please ensure it is a valid PDF file.")]
    Unparseable(String),

    #[error("Failed to extract text from PDF. Please ensure the PDF contains readable text.")]
    NoText,
}

/// Converts an uploaded document into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError> {
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&document)
                .map_err(|e| ExtractionError::Unparseable(e.to_string()))
        })
        .await
        .map_err(|e| ExtractionError::Unparseable(format!("extraction task failed: {e}")))??;

        debug!("Extracted {} characters from PDF", text.len());
        Ok(text.trim().to_string())
    }
}

/// Checks an upload's declared type and size before any parsing happens.
pub fn validate_upload(
    file_name: &str,
    content_type: Option<&str>,
    size: usize,
    max_bytes: usize,
) -> Result<(), ExtractionError> {
    let is_pdf = content_type == Some("application/pdf")
        || file_name.to_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err(ExtractionError::NotPdf);
    }
    if size > max_bytes {
        return Err(ExtractionError::TooLarge {
            limit_mb: max_bytes / (1024 * 1024),
        });
    }
    Ok(())
}

/// Rejects extraction results with too little text to analyze.
pub fn ensure_readable(text: &str) -> Result<(), ExtractionError> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        warn!("Extracted text too short ({} chars)", text.trim().len());
        return Err(ExtractionError::NoText);
    }
    Ok(())
}
