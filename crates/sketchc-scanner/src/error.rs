//! Structural scan errors.
//!
//! Offsets are byte offsets into the masked text (comments and literals
//! already replaced), which is the text the atom splitter sees.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unbalanced delimiter '{found}' at offset {offset}: expected '{expected}'")]
    MismatchedDelimiter {
        offset: usize,
        found: char,
        expected: char,
    },

    #[error("unbalanced delimiter '{found}' at offset {offset}: nothing to close")]
    UnmatchedClose { offset: usize, found: char },

    #[error("unbalanced delimiter '{open}' at offset {offset}: never closed")]
    Unclosed { offset: usize, open: char },

    #[error("bracket nesting exceeds {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },
}

impl ScanError {
    pub const fn offset(&self) -> usize {
        match *self {
            Self::MismatchedDelimiter { offset, .. }
            | Self::UnmatchedClose { offset, .. }
            | Self::Unclosed { offset, .. }
            | Self::NestingTooDeep { offset, .. } => offset,
        }
    }
}
