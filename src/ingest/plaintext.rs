use crate::error::{DocError, Result};
use crate::ingest::Extractor;

/// Decodes the bytes as UTF-8, verbatim.
pub struct PlaintextExtractor;

impl Default for PlaintextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaintextExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for PlaintextExtractor {
    fn format(&self) -> &'static str {
        "plaintext"
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| DocError::extraction(name, format!("invalid UTF-8: {e}")))
    }
}
