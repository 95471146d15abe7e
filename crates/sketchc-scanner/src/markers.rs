//! Marker characters.
//!
//! Generated code uses `$` in every synthesized name (`$p`, `$this_1`,
//! `$constr`, `$it0`), so a `$` written by the sketch author must not survive
//! into the masked text. Each one is encoded as `__x0024` and decoded again
//! after rendering. Pre-existing `__xHHHH` sequences are escaped first
//! (`__x005F_xHHHH`) so decoding restores them unchanged.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CHAR_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__x([0-9A-F]{4})").expect("valid regex"));

static RETURN_NEWLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breturn\s*[\n\r]+").expect("valid regex"));

/// Escape existing character codes, then encode every `$`.
pub fn encode_markers(text: &str) -> String {
    let escaped = CHAR_CODE_RE.replace_all(text, |caps: &Captures<'_>| {
        format!("__x005F_x{}", &caps[1])
    });
    escaped.replace('$', "__x0024")
}

/// Turn every `__xHHHH` back into the character it names.
pub fn decode_markers(text: &str) -> String {
    CHAR_CODE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), |ch| ch.to_string())
        })
        .into_owned()
}

/// `return` followed by a line break would return nothing in the output
/// dialect; keep the operand on the same line.
pub fn join_return_lines(text: &str) -> String {
    RETURN_NEWLINE_RE.replace_all(text, "return ").into_owned()
}

#[cfg(test)]
#[path = "../tests/markers.rs"]
mod tests;
