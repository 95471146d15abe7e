//! String re-injector.
//!
//! Last step of the pipeline: every `'N'` placeholder is replaced by the
//! literal it stands for. Regex literals go back verbatim; single-character
//! literals become character objects, since the output dialect has no
//! character type.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchc_common::HOST_HANDLE;

use crate::mask::{LiteralKind, LiteralTable};

static LITERAL_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(\d+)'").expect("valid regex"));

/// Substitute literal placeholders. Indices without a table entry are kept.
pub fn inject_literals(text: &str, literals: &LiteralTable) -> String {
    LITERAL_PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let record = caps[1].parse().ok().and_then(|index| literals.get(index));
            match record {
                Some(record) if record.kind == LiteralKind::Char => {
                    format!("(new {HOST_HANDLE}.Character({}))", record.raw)
                }
                Some(record) => record.raw.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
#[path = "../tests/inject.rs"]
mod tests;
