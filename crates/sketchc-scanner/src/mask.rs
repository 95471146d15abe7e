//! Lexical mask layer.
//!
//! A single left-to-right scan that removes comments and moves every string,
//! character and regex literal into a `LiteralTable`, leaving a `'N'`
//! placeholder behind. After this pass no quote character remains in the
//! text, which is what makes the placeholder grammar of later phases safe.
//!
//! Regex literals do not exist in the sketch language proper, but sketches
//! mixing in script code use them. A `/` starts a regex only when the previous
//! significant character is one of `[ ( = | & ! ^ : ?`; anywhere else it is a
//! division operator. This positional rule is an approximation, not lexing.

use memchr::memchr;
use sketchc_common::{Diagnostic, diagnostic_codes};
use tracing::debug;

use crate::markers::{encode_markers, join_return_lines};
use crate::placeholder::literal_placeholder;

/// What a recorded literal was in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    /// A string literal, `"..."` or a multi-character `'...'`.
    Str,
    /// A single-character `'c'` literal, rendered as a character object.
    Char,
    /// A `/body/flags` regex literal.
    Regex,
}

/// One extracted literal, including its delimiters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralRecord {
    pub index: usize,
    pub raw: String,
    pub kind: LiteralKind,
}

/// Side table of extracted literals, indexed by placeholder number.
#[derive(Clone, Debug, Default)]
pub struct LiteralTable {
    records: Vec<LiteralRecord>,
}

impl LiteralTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a literal and return its placeholder.
    pub fn push(&mut self, raw: &str, kind: LiteralKind) -> String {
        let index = self.records.len();
        self.records.push(LiteralRecord {
            index,
            raw: raw.to_string(),
            kind,
        });
        literal_placeholder(index)
    }

    pub fn get(&self, index: usize) -> Option<&LiteralRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LiteralRecord> {
        self.records.iter()
    }
}

/// Masked text plus the literals taken out of it.
#[derive(Clone, Debug, Default)]
pub struct MaskedSource {
    pub text: String,
    pub literals: LiteralTable,
    pub diagnostics: Vec<Diagnostic>,
}

/// The full lexical mask layer: literal masking, marker neutralisation and
/// joining of `return` onto the line of its operand.
pub fn mask_source(source: &str) -> MaskedSource {
    let mut masked = mask_literals(source);
    masked.text = join_return_lines(&encode_markers(&masked.text));
    masked
}

/// Characters after which a `/` opens a regex literal.
const REGEX_PREFIX: &[u8] = b"[(=|&!^:?";

/// Strip comments and mask string, character and regex literals.
pub fn mask_literals(source: &str) -> MaskedSource {
    let src = normalize_newlines(source);
    let bytes = src.as_bytes();
    let len = bytes.len();

    let mut out = String::with_capacity(len);
    let mut literals = LiteralTable::new();
    let mut diagnostics = Vec::new();
    let mut copy_from = 0;
    let mut pos = 0;

    while pos < len {
        match bytes[pos] {
            quote @ (b'"' | b'\'') => match scan_quoted(bytes, pos, quote) {
                Some(end) => {
                    out.push_str(&src[copy_from..pos]);
                    let raw = &src[pos..end];
                    let kind = if quote == b'\'' && is_char_literal(raw) {
                        LiteralKind::Char
                    } else {
                        LiteralKind::Str
                    };
                    out.push_str(&literals.push(raw, kind));
                    pos = end;
                    copy_from = end;
                }
                None => {
                    diagnostics.push(
                        Diagnostic::from_code(
                            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                            &[if quote == b'"' { "\"" } else { "'" }],
                        )
                        .at(pos as u32),
                    );
                    pos += 1;
                }
            },
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                out.push_str(&src[copy_from..pos]);
                match memchr(b'\n', &bytes[pos..]) {
                    Some(rel) => {
                        out.push('\n');
                        pos += rel + 1;
                    }
                    None => pos = len,
                }
                copy_from = pos;
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                out.push_str(&src[copy_from..pos]);
                match find_block_comment_end(bytes, pos + 2) {
                    Some(end) => {
                        out.push(' ');
                        pos = end;
                    }
                    None => {
                        diagnostics.push(
                            Diagnostic::from_code(
                                diagnostic_codes::UNTERMINATED_BLOCK_COMMENT,
                                &[],
                            )
                            .at(pos as u32),
                        );
                        pos = len;
                    }
                }
                copy_from = pos;
            }
            b'/' if in_regex_position(&out, &src[copy_from..pos]) => {
                match scan_regex(bytes, pos) {
                    Some(end) => {
                        out.push_str(&src[copy_from..pos]);
                        out.push_str(&literals.push(&src[pos..end], LiteralKind::Regex));
                        pos = end;
                        copy_from = end;
                    }
                    None => pos += 1,
                }
            }
            _ => pos += 1,
        }
    }
    out.push_str(&src[copy_from..]);

    debug!(
        literals = literals.len(),
        diagnostics = diagnostics.len(),
        "masked literals"
    );
    MaskedSource {
        text: out,
        literals,
        diagnostics,
    }
}

/// `\r\n`, `\n\r` and lone `\r` all become `\n`.
fn normalize_newlines(source: &str) -> String {
    if !source.contains('\r') {
        return source.to_string();
    }
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push('\n');
            }
            '\n' => {
                chars.next_if_eq(&'\r');
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    out
}

/// End offset (exclusive) of a quoted literal starting at `start`, or `None`
/// when it runs into a line break or the end of input.
fn scan_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => {
                if bytes.get(pos + 1).is_none_or(|&next| next == b'\n') {
                    return None;
                }
                pos += 2;
            }
            b'\n' => return None,
            b if b == quote => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

fn find_block_comment_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while pos + 1 < bytes.len() {
        if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
            return Some(pos + 2);
        }
        pos += 1;
    }
    None
}

/// True when the last non-whitespace character before the `/` is a regex
/// prefix. `pending` is source text not yet copied to `out`.
fn in_regex_position(out: &str, pending: &str) -> bool {
    let prev = pending
        .bytes()
        .rev()
        .chain(out.bytes().rev())
        .find(|b| !b.is_ascii_whitespace());
    prev.is_some_and(|b| REGEX_PREFIX.contains(&b))
}

/// End offset of a regex literal `/body/flags` starting at `start`.
fn scan_regex(bytes: &[u8], start: usize) -> Option<usize> {
    if matches!(bytes.get(start + 1), Some(b'*' | b'/') | None) {
        return None;
    }
    let mut pos = start + 1;
    loop {
        match *bytes.get(pos)? {
            b'\\' => {
                if bytes.get(pos + 1).is_none_or(|&next| next == b'\n') {
                    return None;
                }
                pos += 2;
            }
            b'\n' => return None,
            b'/' => break,
            _ => pos += 1,
        }
    }
    pos += 1;
    while matches!(bytes.get(pos), Some(b'g' | b'i' | b'm')) {
        pos += 1;
    }
    Some(pos)
}

/// A single-quoted literal holding exactly one character or one escape
/// (`'a'`, `'\n'`, `'A'`).
fn is_char_literal(raw: &str) -> bool {
    let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) else {
        return false;
    };
    match inner.strip_prefix('\\') {
        Some(escape) => {
            let mut chars = escape.chars();
            chars.next().is_some() && chars.all(|c| c.is_ascii_hexdigit())
        }
        None => {
            let mut chars = inner.chars();
            matches!(chars.next(), Some(c) if c != '\'' && c != '\n') && chars.next().is_none()
        }
    }
}

#[cfg(test)]
#[path = "../tests/mask.rs"]
mod tests;
