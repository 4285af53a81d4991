use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{DocError, Result};
use crate::ingest::Extractor;

/// Page-based PDF text extractor.
///
/// The bytes are spooled to a temporary file that is removed when the
/// extractor returns, whether parsing succeeded or not.
pub struct PdfExtractor;

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PdfExtractor {
    fn format(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<String> {
        let mut spool = tempfile::Builder::new()
            .prefix("doccheck-")
            .suffix(".pdf")
            .tempfile()
            .map_err(|e| DocError::extraction(name, format!("cannot create temp file: {e}")))?;
        let spooled = spool.write_all(bytes);
        spooled
            .and(spool.flush())
            .map_err(|e| DocError::extraction(name, format!("cannot spool PDF: {e}")))?;

        let path = spool.path().to_path_buf();
        // pdf-extract panics on some malformed inputs
        let pages = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_by_pages(&path)))
            .map_err(|_| DocError::extraction(name, "PDF parser aborted on malformed input"))?
            .map_err(|e| DocError::extraction(name, format!("PDF extraction error: {e}")))?;

        tracing::debug!(file = name, pages = pages.len(), "parsed PDF");
        Ok(join_pages(&pages))
    }
}

/// Join page texts with single newlines. Blank lines the backend emits
/// around a page are dropped; empty pages still contribute a segment.
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.trim_matches(|c| c == '\n' || c == '\r'))
        .collect::<Vec<_>>()
        .join("\n")
}
