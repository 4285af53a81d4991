use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Suffixes accepted by the diff tool.
pub const DIFF_SUFFIXES: &[&str] = &["pdf", "docx", "txt", "md"];
/// Suffixes loaded as regulations. Anything else is skipped.
pub const REGULATION_SUFFIXES: &[&str] = &["pdf", "docx"];
/// Suffixes accepted for the contract.
pub const CONTRACT_SUFFIXES: &[&str] = &["docx"];

/// How the bytes of a document are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Word,
    Plain,
}

impl DocumentFormat {
    /// Pick the format from a file name's suffix (case-insensitive).
    /// `.pdf` and `.docx` are structured, everything else is plain text.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match suffix(name).as_deref() {
            Some("pdf") => Self::Pdf,
            Some("docx") => Self::Word,
            _ => Self::Plain,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Plain => "plain",
        }
    }
}

/// Lowercased extension of a file name, without the dot.
#[must_use]
pub fn suffix(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Whether `name` carries one of the given suffixes.
#[must_use]
pub fn has_suffix(name: &str, accepted: &[&str]) -> bool {
    suffix(name).is_some_and(|s| accepted.contains(&s.as_str()))
}

/// An uploaded document: its name, declared format and raw bytes.
#[derive(Debug, Clone)]
pub struct Document {
    /// File name including extension.
    pub name: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl Document {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let format = DocumentFormat::from_name(&name);
        Self {
            name,
            format,
            bytes,
        }
    }

    /// Read a document from disk. The name is the path's file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
            .into_owned();
        Ok(Self::new(name, bytes))
    }
}
