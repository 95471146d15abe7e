//! Atom splitter.
//!
//! Every balanced `{}`, `()` and `[]` region is replaced by a placeholder
//! (`"A#"`, `"B#"`, `"C#"`) and its text, delimiters included, is recorded in
//! the `AtomTable`. Regions nested inside a region are already placeholders
//! when the outer one closes, so each table entry is itself flat.
//!
//! Indices follow the order in which regions CLOSE, so an inner atom always
//! has a lower index than the atom containing it. Entry 0 is the flattened
//! top-level text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchc_common::limits::MAX_BRACKET_DEPTH;
use tracing::debug;

use crate::error::ScanError;
use crate::placeholder::{AtomKind, atom_placeholder};

static BRACKET_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([ABC])(\d+)""#).expect("valid regex"));

/// Append-only table of atom texts.
#[derive(Clone, Debug, Default)]
pub struct AtomTable {
    entries: Vec<String>,
}

impl AtomTable {
    /// The flattened top-level text.
    pub fn top_level(&self) -> &str {
        self.entries.first().map_or("", String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Number of entries, including the top-level text at index 0.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Record new text as an atom and return its placeholder. Existing entries
    /// are never modified; a rewrite of an atom's text is a new atom.
    pub fn push(&mut self, text: impl Into<String>, kind: AtomKind) -> String {
        if self.entries.is_empty() {
            self.entries.push(String::new());
        }
        let index = self.entries.len();
        self.entries.push(text.into());
        atom_placeholder(kind, index)
    }

    /// Recursively substitute bracket placeholders with the text they stand
    /// for. Placeholders pointing outside the table are kept verbatim.
    pub fn expand(&self, text: &str) -> String {
        self.expand_below(text, usize::MAX)
    }

    /// Expand only references to entries below `limit`; entries can only
    /// refer to older entries, which keeps the recursion finite.
    fn expand_below(&self, text: &str, limit: usize) -> String {
        BRACKET_ATOM_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let index: usize = match caps[2].parse() {
                    Ok(index) => index,
                    Err(_) => return caps[0].to_string(),
                };
                match self.get(index) {
                    Some(entry) if index > 0 && index < limit => self.expand_below(entry, index),
                    _ => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}

/// Split `text` into atoms with an explicit bracket stack.
pub fn split_to_atoms(text: &str) -> Result<AtomTable, ScanError> {
    struct Open {
        outer: String,
        delimiter: u8,
        offset: usize,
    }

    let mut entries = vec![String::new()];
    let mut stack: Vec<Open> = Vec::new();
    let mut current = String::with_capacity(text.len());
    let mut copy_from = 0;

    for (offset, byte) in text.bytes().enumerate() {
        match byte {
            b'{' | b'(' | b'[' => {
                if stack.len() >= MAX_BRACKET_DEPTH {
                    return Err(ScanError::NestingTooDeep {
                        offset,
                        limit: MAX_BRACKET_DEPTH,
                    });
                }
                current.push_str(&text[copy_from..offset]);
                let outer = std::mem::replace(&mut current, String::from(byte as char));
                stack.push(Open {
                    outer,
                    delimiter: byte,
                    offset,
                });
                copy_from = offset + 1;
            }
            b'}' | b')' | b']' => {
                let Some(open) = stack.pop() else {
                    return Err(ScanError::UnmatchedClose {
                        offset,
                        found: byte as char,
                    });
                };
                let expected = closing_for(open.delimiter);
                if byte != expected {
                    return Err(ScanError::MismatchedDelimiter {
                        offset,
                        found: byte as char,
                        expected: expected as char,
                    });
                }
                current.push_str(&text[copy_from..=offset]);
                let kind = AtomKind::from_close(byte).unwrap_or(AtomKind::Block);
                let index = entries.len();
                entries.push(std::mem::replace(&mut current, open.outer));
                current.push_str(&atom_placeholder(kind, index));
                copy_from = offset + 1;
            }
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(ScanError::Unclosed {
            offset: open.offset,
            open: open.delimiter as char,
        });
    }
    current.push_str(&text[copy_from..]);
    entries[0] = current;

    debug!(atoms = entries.len() - 1, "split into atoms");
    Ok(AtomTable { entries })
}

const fn closing_for(open: u8) -> u8 {
    match open {
        b'{' => b'}',
        b'(' => b')',
        _ => b']',
    }
}

#[cfg(test)]
#[path = "../tests/atoms.rs"]
mod tests;
