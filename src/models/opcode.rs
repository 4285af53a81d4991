use std::ops::Range;

use serde::Serialize;

/// Classification of one aligned run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Unchanged between both sides.
    Equal,
    /// Present only in the new text.
    Insert,
    /// Present only in the old text.
    Delete,
    /// Changed between both sides.
    Replace,
}

impl From<similar::DiffTag> for Tag {
    fn from(tag: similar::DiffTag) -> Self {
        match tag {
            similar::DiffTag::Equal => Self::Equal,
            similar::DiffTag::Insert => Self::Insert,
            similar::DiffTag::Delete => Self::Delete,
            similar::DiffTag::Replace => Self::Replace,
        }
    }
}

/// One maximal matching or differing run between two character sequences.
///
/// Offsets are character indices, `old_start..old_end` into the old text
/// and `new_start..new_end` into the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Opcode {
    pub tag: Tag,
    pub old_start: usize,
    pub old_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Opcode {
    #[must_use]
    pub fn new(tag: Tag, old: Range<usize>, new: Range<usize>) -> Self {
        Self {
            tag,
            old_start: old.start,
            old_end: old.end,
            new_start: new.start,
            new_end: new.end,
        }
    }

    #[must_use]
    pub fn old_range(&self) -> Range<usize> {
        self.old_start..self.old_end
    }

    #[must_use]
    pub fn new_range(&self) -> Range<usize> {
        self.new_start..self.new_end
    }
}
