//! Character-level alignment and dual-view highlighting.

pub mod highlight;
pub mod matcher;

use serde::{Deserialize, Serialize};
use similar::Algorithm;

use crate::models::Opcode;

pub use highlight::{escape_html, highlight, HighlightStyle, Highlighter};
pub use matcher::{similarity, SequenceMatcher};

/// Which opcode generator aligns the two texts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Ratcliff/Obershelp longest-block matching.
    #[default]
    Ratcliff,
    /// Myers' O(ND) shortest edit script.
    Myers,
    /// Patience diff on unique elements.
    Patience,
}

/// Align two character sequences into opcodes covering both completely.
#[must_use]
pub fn opcodes(old: &[char], new: &[char], algorithm: DiffAlgorithm) -> Vec<Opcode> {
    let algorithm = match algorithm {
        DiffAlgorithm::Ratcliff => return SequenceMatcher::new(old, new).opcodes(),
        DiffAlgorithm::Myers => Algorithm::Myers,
        DiffAlgorithm::Patience => Algorithm::Patience,
    };
    similar::capture_diff_slices(algorithm, old, new)
        .iter()
        .map(|op| {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            Opcode::new(tag.into(), old_range, new_range)
        })
        .collect()
}
