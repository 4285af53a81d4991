//! Accepted file types per tool.

use serde::Serialize;

use crate::models::document::{CONTRACT_SUFFIXES, DIFF_SUFFIXES, REGULATION_SUFFIXES};
use crate::models::DocumentFormat;

/// Result of listing accepted formats.
#[derive(Debug, Clone, Serialize)]
pub struct FormatsResult {
    /// Inputs of `doccheck diff`.
    pub diff: Vec<FormatInfo>,
    /// The `--contract` input of `doccheck check`.
    pub contract: Vec<FormatInfo>,
    /// The `--regulation` inputs of `doccheck check`. Other files are skipped.
    pub regulation: Vec<FormatInfo>,
}

/// One accepted suffix.
#[derive(Debug, Clone, Serialize)]
pub struct FormatInfo {
    /// The file extension (e.g. ".docx").
    pub ext: String,
    /// How the bytes are read: pdf, word or plain.
    pub reader: &'static str,
}

fn infos(suffixes: &[&str]) -> Vec<FormatInfo> {
    let mut infos: Vec<FormatInfo> = suffixes
        .iter()
        .map(|s| FormatInfo {
            ext: format!(".{s}"),
            reader: DocumentFormat::from_name(&format!("x.{s}")).as_str(),
        })
        .collect();
    infos.sort_by(|a, b| a.ext.cmp(&b.ext));
    infos
}

/// List accepted suffixes for every tool.
#[must_use]
pub fn list_formats() -> FormatsResult {
    FormatsResult {
        diff: infos(DIFF_SUFFIXES),
        contract: infos(CONTRACT_SUFFIXES),
        regulation: infos(REGULATION_SUFFIXES),
    }
}
