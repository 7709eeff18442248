//! PDF page text extraction via `pdf-extract`. Layout fidelity is best-effort.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct PdfError(String);

/// Returns the text of every page, one page per line, in page order.
pub fn extract_pages(bytes: &[u8]) -> Result<String, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| PdfError(e.to_string()))?;
    Ok(join_pages(&pages))
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n")
}
