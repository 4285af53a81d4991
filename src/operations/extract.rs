//! Text extraction output for a single document.

use serde::Serialize;

use crate::ingest::{extract_or_warn, ParagraphFilter};
use crate::models::Document;

/// Serializable result of `doccheck extract`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutput {
    pub name: String,
    pub format: &'static str,
    pub chars: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Extract a document the way the diff tool does.
///
/// Failures never abort: the text is empty and `warning` carries the reason.
#[must_use]
pub fn extract_document(document: &Document, paragraphs: ParagraphFilter) -> ExtractOutput {
    let extraction = extract_or_warn(document, paragraphs);
    ExtractOutput {
        name: document.name.clone(),
        format: document.format.as_str(),
        chars: extraction.text.chars().count(),
        text: extraction.text,
        warning: extraction.warning,
    }
}
