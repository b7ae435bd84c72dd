//! Document Extractor — turns an uploaded resume into plain text.
//!
//! Supported: PDF (via `pdf-extract`) and DOCX (via `docx-rs`). Any other
//! extension yields empty text without an error. Decoding is CPU-bound and
//! runs on the blocking pool so a slow or panicking decoder never stalls the
//! runtime.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

mod docx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Derives the document kind from the uploaded file name's suffix.
    /// Matching is case-insensitive, so a bare `.pdf` is still a PDF.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let name = file_name.to_ascii_lowercase();
        if name.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if name.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => f.write_str("PDF"),
            DocumentKind::Docx => f.write_str("DOCX"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read {kind} document: {message}")]
    Decode { kind: DocumentKind, message: String },

    #[error("{kind} decoder aborted: {message}")]
    Aborted { kind: DocumentKind, message: String },
}

/// Extracts plain text from an uploaded file.
///
/// Returns an empty string for unsupported extensions. Decoder failures are
/// returned to the caller, which decides whether to skip the resume.
pub async fn extract_text(file_name: &str, bytes: Bytes) -> Result<String, ExtractionError> {
    let Some(kind) = DocumentKind::from_file_name(file_name) else {
        debug!("Skipping extraction for unsupported file '{file_name}'");
        return Ok(String::new());
    };

    tokio::task::spawn_blocking(move || extract_document(kind, &bytes))
        .await
        .map_err(|e| ExtractionError::Aborted {
            kind,
            message: e.to_string(),
        })?
}

/// Synchronous extraction for a known document kind.
pub fn extract_document(kind: DocumentKind, data: &[u8]) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Pdf => extract_pdf(data),
        DocumentKind::Docx => docx::extract_docx(data),
    }
}

/// Pages without a text layer produce no output, so concatenating the whole
/// document is equivalent to joining the non-empty pages.
fn extract_pdf(data: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractionError::Decode {
        kind: DocumentKind::Pdf,
        message: e.to_string(),
    })
}
