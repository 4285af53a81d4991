//! Diff operations shared by the CLI commands.
//!
//! Extracts both documents, aligns them and renders the two highlighted views.

use serde::Serialize;

use crate::diff::{opcodes, similarity, Highlighter};
use crate::error::{DocError, Result};
use crate::ingest::{extract_or_warn, ParagraphFilter};
use crate::models::document::{has_suffix, DIFF_SUFFIXES};
use crate::models::{Document, Opcode, Tag};

/// Character counts of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffStats {
    /// Characters unchanged.
    pub equal: usize,
    /// Characters only in the new text (inserted or replacing).
    pub inserted: usize,
    /// Characters only in the old text (deleted or replaced).
    pub deleted: usize,
    /// `2 * equal / (old + new)`, 1.0 for two empty texts.
    pub ratio: f64,
    /// Number of opcodes.
    pub opcodes: usize,
}

impl DiffStats {
    #[must_use]
    pub fn from_opcodes(ops: &[Opcode]) -> Self {
        let mut stats = Self {
            equal: 0,
            inserted: 0,
            deleted: 0,
            ratio: 1.0,
            opcodes: ops.len(),
        };
        for op in ops {
            let old_len = op.old_range().len();
            let new_len = op.new_range().len();
            match op.tag {
                Tag::Equal => stats.equal += old_len,
                Tag::Insert => stats.inserted += new_len,
                Tag::Delete => stats.deleted += old_len,
                Tag::Replace => {
                    stats.deleted += old_len;
                    stats.inserted += new_len;
                }
            }
        }
        let total = 2 * stats.equal + stats.inserted + stats.deleted;
        stats.ratio = similarity(stats.equal, total);
        stats
    }
}

/// Result of diffing two documents.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    pub old_name: String,
    pub new_name: String,
    /// Old text with deletions highlighted.
    pub old_html: String,
    /// New text with insertions highlighted.
    pub new_html: String,
    pub stats: DiffStats,
    /// Extraction problems; the affected side was diffed as empty text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Reject inputs the diff tool does not accept.
pub fn check_diff_input(document: &Document) -> Result<()> {
    if has_suffix(&document.name, DIFF_SUFFIXES) {
        Ok(())
    } else {
        Err(DocError::Validation(format!(
            "unsupported file type: {} (expected one of: {})",
            document.name,
            DIFF_SUFFIXES
                .iter()
                .map(|s| format!(".{s}"))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// Extract both documents and diff their text.
pub fn diff_documents(
    old: &Document,
    new: &Document,
    highlighter: &Highlighter,
) -> Result<DiffReport> {
    check_diff_input(old)?;
    check_diff_input(new)?;

    let mut warnings = Vec::new();
    let old_extraction = extract_or_warn(old, ParagraphFilter::NonBlank);
    let new_extraction = extract_or_warn(new, ParagraphFilter::NonBlank);
    warnings.extend(old_extraction.warning);
    warnings.extend(new_extraction.warning);

    let a: Vec<char> = old_extraction.text.chars().collect();
    let b: Vec<char> = new_extraction.text.chars().collect();
    let ops = opcodes(&a, &b, highlighter.algorithm);
    let (old_html, new_html) = highlighter.render(&a, &b, &ops);
    let stats = DiffStats::from_opcodes(&ops);

    tracing::info!(
        old = %old.name,
        new = %new.name,
        inserted = stats.inserted,
        deleted = stats.deleted,
        ratio = stats.ratio,
        "diffed documents"
    );

    Ok(DiffReport {
        old_name: old.name.clone(),
        new_name: new.name.clone(),
        old_html,
        new_html,
        stats,
        warnings,
    })
}
