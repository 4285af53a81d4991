pub mod docx;
pub mod pdf;
pub mod plaintext;

use serde::Serialize;

use crate::error::Result;
use crate::models::{Document, DocumentFormat};

pub use docx::{DocxExtractor, ParagraphFilter};
pub use pdf::PdfExtractor;
pub use plaintext::PlaintextExtractor;

/// Trait for format-specific text extractors.
pub trait Extractor: Send + Sync {
    /// Format identifier.
    fn format(&self) -> &'static str;

    /// Turn the raw bytes of `name` into plain text with logical line breaks.
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<String>;
}

/// Pick the extractor for a document format.
#[must_use]
pub fn extractor_for(format: DocumentFormat, paragraphs: ParagraphFilter) -> Box<dyn Extractor> {
    match format {
        DocumentFormat::Pdf => Box::new(PdfExtractor::new()),
        DocumentFormat::Word => Box::new(DocxExtractor::new(paragraphs)),
        DocumentFormat::Plain => Box::new(PlaintextExtractor::new()),
    }
}

/// Extract with the default paragraph filter (blank paragraphs dropped).
pub fn extract(document: &Document) -> Result<String> {
    extract_with(document, ParagraphFilter::NonBlank)
}

/// Extract with an explicit paragraph filter for Word documents.
pub fn extract_with(document: &Document, paragraphs: ParagraphFilter) -> Result<String> {
    extractor_for(document.format, paragraphs).extract(&document.name, &document.bytes)
}

/// Text of a document plus the warning raised if extraction failed.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Extract, degrading to empty text plus a warning on failure.
#[must_use]
pub fn extract_or_warn(document: &Document, paragraphs: ParagraphFilter) -> Extraction {
    match extract_with(document, paragraphs) {
        Ok(text) => {
            tracing::debug!(
                file = %document.name,
                format = document.format.as_str(),
                chars = text.chars().count(),
                "extracted text"
            );
            Extraction {
                text,
                warning: None,
            }
        }
        Err(e) => {
            tracing::warn!(file = %document.name, error = %e, "text extraction failed");
            Extraction {
                text: String::new(),
                warning: Some(e.to_string()),
            }
        }
    }
}
