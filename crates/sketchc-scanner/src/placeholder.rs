//! Placeholder tokens.
//!
//! Three families of tokens stand in for text that later phases must not
//! look into:
//!
//! - atoms: `"A5"`, a quoted kind letter followed by the atom index
//! - literals: `'5'`, a quoted literal-table index
//! - deferred transforms: `"!5"`, an index into an expression's transform list
//!
//! None of these shapes can occur in masked source: every quote character of
//! the input has been moved into the literal table by then.

use std::fmt::Write as _;

/// The region an atom stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// `{ ... }`
    Block,
    /// `( ... )`
    Group,
    /// `[ ... ]`
    Index,
    /// A method declaration inside a class or at top level.
    Method,
    /// A class or interface declaration.
    Class,
    /// `new Type(...) { ... }` anonymous class instantiation.
    InlineClass,
    /// A constructor declaration.
    Constructor,
    /// A `function (...) { ... }` literal.
    Function,
    /// The inside of an object literal `{ key: value }`.
    InlineObject,
}

impl AtomKind {
    pub const fn letter(self) -> char {
        match self {
            Self::Block => 'A',
            Self::Group => 'B',
            Self::Index => 'C',
            Self::Method => 'D',
            Self::Class => 'E',
            Self::InlineClass => 'F',
            Self::Constructor => 'G',
            Self::Function => 'H',
            Self::InlineObject => 'I',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'A' => Self::Block,
            'B' => Self::Group,
            'C' => Self::Index,
            'D' => Self::Method,
            'E' => Self::Class,
            'F' => Self::InlineClass,
            'G' => Self::Constructor,
            'H' => Self::Function,
            'I' => Self::InlineObject,
            _ => return None,
        })
    }

    /// Kind of the bracket region closed by `close`.
    pub const fn from_close(close: u8) -> Option<Self> {
        match close {
            b'}' => Some(Self::Block),
            b')' => Some(Self::Group),
            b']' => Some(Self::Index),
            _ => None,
        }
    }

    /// True for the three kinds produced directly by bracket splitting.
    pub const fn is_bracket(self) -> bool {
        matches!(self, Self::Block | Self::Group | Self::Index)
    }
}

pub fn atom_placeholder(kind: AtomKind, index: usize) -> String {
    let mut out = String::with_capacity(8);
    let _ = write!(out, "\"{}{}\"", kind.letter(), index);
    out
}

pub fn literal_placeholder(index: usize) -> String {
    format!("'{index}'")
}

pub fn transform_placeholder(index: usize) -> String {
    format!("\"!{index}\"")
}

/// Parse a complete atom placeholder such as `"B12"`.
pub fn parse_atom_placeholder(token: &str) -> Option<(AtomKind, usize)> {
    let inner = token.strip_prefix('"')?.strip_suffix('"')?;
    let mut chars = inner.chars();
    let kind = AtomKind::from_letter(chars.next()?)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((kind, digits.parse().ok()?))
}

#[cfg(test)]
#[path = "../tests/placeholder.rs"]
mod tests;
