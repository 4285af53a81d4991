use serde::Serialize;

use crate::compliance::Regulation;
use crate::ingest::{extract_or_warn, ParagraphFilter};
use crate::models::document::{has_suffix, REGULATION_SUFFIXES};
use crate::models::Document;

/// Outcome of loading a batch of regulation files.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LoadReport {
    pub regulations: Vec<Regulation>,
    /// Files ignored because of their suffix.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    /// Files that were attempted but yielded no text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Extract every `.pdf`/`.docx` regulation, skipping other suffixes.
///
/// A failed file is reported in `warnings` and does not stop the others.
#[must_use]
pub fn load_regulations(documents: &[Document]) -> LoadReport {
    let mut report = LoadReport::default();

    for doc in documents {
        if !has_suffix(&doc.name, REGULATION_SUFFIXES) {
            tracing::debug!(file = %doc.name, "skipping regulation with unsupported suffix");
            report.skipped.push(doc.name.clone());
            continue;
        }

        let extraction = extract_or_warn(doc, ParagraphFilter::All);
        if let Some(warning) = extraction.warning {
            report.warnings.push(warning);
            continue;
        }
        if extraction.text.is_empty() {
            tracing::warn!(file = %doc.name, "regulation contains no text");
            report
                .warnings
                .push(format!("no text could be extracted from {}", doc.name));
            continue;
        }

        report.regulations.push(Regulation {
            filename: doc.name.clone(),
            content: extraction.text,
        });
    }

    tracing::info!(
        loaded = report.regulations.len(),
        skipped = report.skipped.len(),
        failed = report.warnings.len(),
        "loaded regulations"
    );
    report
}
