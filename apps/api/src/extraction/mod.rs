//! Text extraction from uploaded documents.
//!
//! The document kind is resolved once from the filename, then matched exhaustively:
//! - `.docx` → paragraphs from `word/document.xml`
//! - `.pdf`  → page text via `pdf-extract`
//! - `.txt` and everything else → UTF-8 decode of the raw bytes
//!
//! Extraction works on the in-memory upload only. Parsing is CPU-bound, so async
//! callers go through [`extract_blocking`].

pub mod docx;
pub mod pdf;

use std::fmt;

use bytes::Bytes;
use thiserror::Error;

/// A file received from the upload form. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_filename(&self.filename)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Pdf,
    Text,
    Unknown,
}

impl DocumentKind {
    /// Resolves the kind from the lower-cased filename suffix.
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.trim().to_lowercase();
        if lower.ends_with(".docx") {
            DocumentKind::Docx
        } else if lower.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if lower.ends_with(".txt") {
            DocumentKind::Text
        } else {
            DocumentKind::Unknown
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentKind::Docx => ".docx",
            DocumentKind::Pdf => "PDF",
            DocumentKind::Text => "text",
            DocumentKind::Unknown => "unrecognized",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file claims a format we parse, but parsing failed.
    #[error("Error processing {kind} file '{filename}': {source}")]
    Malformed {
        filename: String,
        kind: DocumentKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },
}

impl ExtractError {
    fn malformed(
        document: &UploadedDocument,
        kind: DocumentKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ExtractError::Malformed {
            filename: document.filename.clone(),
            kind,
            source: source.into(),
        }
    }
}

/// Returns the plain text of `document`, dispatching on its filename.
pub fn extract(document: &UploadedDocument) -> Result<String, ExtractError> {
    let kind = document.kind();
    match kind {
        DocumentKind::Docx => {
            docx::extract_paragraphs(&document.content)
                .map_err(|e| ExtractError::malformed(document, kind, e))
        }
        DocumentKind::Pdf => {
            pdf::extract_pages(&document.content)
                .map_err(|e| ExtractError::malformed(document, kind, e))
        }
        DocumentKind::Text => String::from_utf8(document.content.to_vec())
            .map_err(|e| ExtractError::malformed(document, kind, e)),
        DocumentKind::Unknown => String::from_utf8(document.content.to_vec()).map_err(|_| {
            ExtractError::UnsupportedFormat {
                filename: document.filename.clone(),
            }
        }),
    }
}

/// Runs [`extract`] on the blocking pool. A parser panic surfaces as `Malformed`.
pub async fn extract_blocking(document: UploadedDocument) -> Result<String, ExtractError> {
    let filename = document.filename.clone();
    let kind = document.kind();

    tokio::task::spawn_blocking(move || extract(&document))
        .await
        .map_err(|e| ExtractError::Malformed {
            filename,
            kind,
            source: format!("parser aborted: {e}").into(),
        })?
}
