//! Shared declaration patterns and regex helpers.
//!
//! All structural recognition works on atom-masked text: bodies, parameter
//! lists and index expressions are single `"A#"`, `"B#"`, `"C#"` tokens, so
//! these patterns never have to balance brackets.
//!
//! The `regex` crate has no lookaround. Patterns that need a negative
//! lookahead are matched with `replace_matches`/`find_accepted`, whose
//! callback rejects a candidate; the search then resumes one character after
//! the rejected match's start.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const IDENT: &str = r"[A-Za-z_$][\w$]*";

/// A possibly dotted name: `Foo`, `java.util.List`.
pub const QNAME: &str = r"[A-Za-z_$][\w$]*\b(?:\s*\.\s*[A-Za-z_$][\w$]*\b)*";

const CLASS_MODIFIERS: &str = r"(?:(?:public|private|final|protected|static|abstract)\s+)*";
const METHOD_MODIFIERS: &str =
    r"(?:(?:public|private|final|protected|static|abstract|synchronized)\s+)*";
const FIELD_MODIFIERS: &str = r"(?:(?:public|private|final|protected|static)\s+)*";

/// First words that can never start a method's return type.
pub const NOT_A_METHOD_TYPE: &[&str] = &[
    "else", "new", "return", "throw", "function", "public", "private", "protected",
];

/// First words that can never start a constructor declaration.
pub const NOT_A_CONSTRUCTOR: &[&str] = &["new", "return", "throw"];

/// First words that can never start the type of a field or local variable.
pub const NOT_A_FIELD_TYPE: &[&str] = &["else", "new", "return", "throw"];

/// 1: modifiers, 2: `class`/`interface`, 3: name, 4: extends, 5: implements,
/// 6: body atom.
pub static CLASSES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b({CLASS_MODIFIERS})(class|interface)\s+({IDENT}\b)(\s+extends\s+{QNAME}(?:\s*,\s*{QNAME})*)?(\s+implements\s+{QNAME}(?:\s*,\s*{QNAME})*)?\s*("A\d+")"#
    ))
    .expect("valid regex")
});

/// 1: modifiers, 2: return type, 3: name, 4: params atom, 5: throws,
/// 6: body atom or `;`.
pub static METHODS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b({METHOD_MODIFIERS})({QNAME}(?:\s*"C\d+")*)\s*({IDENT}\b)\s*("B\d+")(\s*throws\s+{QNAME}(?:\s*,\s*{QNAME})*)?\s*("A\d+"|;)"#
    ))
    .expect("valid regex")
});

/// 1: name, 2: params atom, 3: body atom.
pub static FUNCTIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\bfunction(?:\s+({IDENT}))?\s*("B\d+")\s*("A\d+")"#))
        .expect("valid regex")
});

/// 1: modifiers, 2: name, 3: params atom, 4: throws, 5: body atom.
pub static CONSTRUCTORS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b({METHOD_MODIFIERS})({IDENT}\b)\s*("B\d+")(\s*throws\s+{QNAME}(?:\s*,\s*{QNAME})*)?\s*("A\d+")"#
    ))
    .expect("valid regex")
});

/// A declaration statement: 1: modifiers, 2: type, 3: first name,
/// 4: `=`, `,` or end.
pub static FIELD_TEST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^({FIELD_MODIFIERS})({QNAME}(?:\s*"C\d+")*)\s*({IDENT}\b)\s*(?:"C\d+"\s*)*([=,]|$)"#
    ))
    .expect("valid regex")
});

/// Modifiers and type of a declaration: 1: modifiers, 2: type.
pub static ATTR_AND_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^({FIELD_MODIFIERS})({QNAME}(?:\s*"C\d+")*)\s*"#))
        .expect("valid regex")
});

/// Statement boundaries, see `ParserState::parse_statements`.
pub static NEXT_STATEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b(catch|for|if|switch|while|with)\s*"B(\d+)"|\b(do|else|finally|return|throw|try|break|continue)\b|("[ADEH](\d+)")|\b(case)\s+([^:]+):|\b({IDENT}\s*:)|(;)"#
    ))
    .expect("valid regex")
});

/// Any placeholder token: atom or deferred transform.
pub static ANY_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([A-I!])(\d+)""#).expect("valid regex"));

/// First identifier of a type or name, used to apply the keyword exclusions.
pub fn first_word(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(text.len());
    &text[..end]
}

/// True when the first word of `text` is one of `words`.
pub fn starts_with_keyword(text: &str, words: &[&str]) -> bool {
    words.contains(&first_word(text))
}

/// Replace each accepted match. `rewrite` returns `None` to reject a
/// candidate, which leaves its text untouched and continues the search one
/// character after the candidate's start.
pub fn replace_matches<F>(re: &Regex, text: &str, mut rewrite: F) -> String
where
    F: FnMut(&Captures<'_>) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut at = 0;
    while at <= text.len() {
        let Some(caps) = re.captures_at(text, at) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        match rewrite(&caps) {
            Some(replacement) => {
                out.push_str(&text[copied..whole.start()]);
                out.push_str(&replacement);
                copied = whole.end();
                at = if whole.is_empty() {
                    next_char_boundary(text, whole.end())
                } else {
                    whole.end()
                };
            }
            None => at = next_char_boundary(text, whole.start()),
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// The first match of `re` in `text` that `accept` approves.
pub fn find_accepted<'t, F>(re: &Regex, text: &'t str, mut accept: F) -> Option<Captures<'t>>
where
    F: FnMut(&Captures<'t>) -> bool,
{
    let mut at = 0;
    while at <= text.len() {
        let caps = re.captures_at(text, at)?;
        let start = caps.get(0)?.start();
        if accept(&caps) {
            return Some(caps);
        }
        at = next_char_boundary(text, start);
    }
    None
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(from + 1, |ch| from + ch.len_utf8())
}

/// `text` split into leading whitespace, content and trailing whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrimmedSpaces<'a> {
    pub left: &'a str,
    pub middle: &'a str,
    pub right: &'a str,
}

impl<'a> TrimmedSpaces<'a> {
    pub fn new(text: &'a str) -> Self {
        let middle_start = text.len() - text.trim_start().len();
        let middle_end = text.trim_end().len().max(middle_start);
        Self {
            left: &text[..middle_start],
            middle: &text[middle_start..middle_end],
            right: &text[middle_end..],
        }
    }

    /// Surround `middle` with the original whitespace.
    pub fn untrim(&self, middle: &str) -> String {
        let mut out = String::with_capacity(self.left.len() + middle.len() + self.right.len());
        out.push_str(self.left);
        out.push_str(middle);
        out.push_str(self.right);
        out
    }
}

/// Atom index of a complete placeholder token such as `"A12"`.
pub fn atom_index(token: &str) -> Option<usize> {
    sketchc_scanner::placeholder::parse_atom_placeholder(token.trim()).map(|(_, index)| index)
}

#[cfg(test)]
#[path = "../../tests/patterns.rs"]
mod tests;
