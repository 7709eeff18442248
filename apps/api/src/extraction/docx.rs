//! `.docx` paragraph extraction.
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`. Each `w:p`
//! element is one paragraph, its visible text is the concatenation of its `w:t` runs.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a valid .docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to read word/document.xml: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document XML: {0}")]
    Xml(String),
}

/// Returns the non-empty paragraphs of the document, one per line, in document order.
pub fn extract_paragraphs(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

    let paragraphs = parse_paragraphs(&xml)?;
    Ok(paragraphs
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// A paragraph being collected, with how many of its `w:r` runs are currently open.
#[derive(Default)]
struct OpenParagraph {
    text: String,
    runs: usize,
}

/// Walks `document.xml` and collects the text of every `w:p`, including empty ones.
///
/// Paragraphs can nest (text boxes inside a run), so open paragraphs are kept on a
/// stack and emitted when they close. `w:tab`, `w:br` and `w:cr` only count inside a
/// run; elsewhere (`w:pPr` tab stops) they are layout. `mc:Fallback` repeats the
/// content of its `mc:Choice` sibling and is skipped.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<OpenParagraph> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut in_text_run = false;
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"Fallback" => {
                fallback_depth += 1;
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"Fallback" => {
                fallback_depth = fallback_depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocxError::Xml(format!(
                    "at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            Ok(_) if fallback_depth > 0 => {}
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => open.push(OpenParagraph::default()),
                b"r" => {
                    if let Some(current) = open.last_mut() {
                        current.runs += 1;
                    }
                }
                b"t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if let Some(current) = open.last_mut().filter(|p| p.runs > 0) {
                    match e.local_name().as_ref() {
                        b"tab" => current.text.push('\t'),
                        b"br" | b"cr" => current.text.push('\n'),
                        _ => {}
                    }
                }
            }
            Ok(Event::Text(t)) if in_text_run => {
                let text = t.unescape().map_err(|e| DocxError::Xml(e.to_string()))?;
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"r" => {
                    if let Some(current) = open.last_mut() {
                        current.runs = current.runs.saturating_sub(1);
                    }
                }
                b"p" => {
                    if let Some(done) = open.pop() {
                        paragraphs.push(done.text);
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(paragraphs)
}
