//! Output post-processing.
//!
//! After rendering, runs of blank lines are collapsed, encoded `$` markers
//! are decoded, any placeholder that survived rendering is reported, and the
//! masked literals are put back.

use once_cell::sync::Lazy;
use regex::Regex;
use sketchc_common::{DiagnosticBag, diagnostic_codes};
use sketchc_scanner::{LiteralTable, decode_markers, inject_literals};

static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\n(?:[\t ]*\n)+").expect("valid regex"));

static LEFTOVER_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[A-I!]\d+""#).expect("valid regex"));

/// Turn rendered text into the final output.
pub fn finish(rendered: &str, literals: &LiteralTable, diagnostics: &mut DiagnosticBag) -> String {
    let collapsed = BLANK_LINES_RE.replace_all(rendered, "\n\n");
    let decoded = decode_markers(&collapsed);
    for leftover in LEFTOVER_PLACEHOLDER_RE.find_iter(&decoded) {
        diagnostics.report(diagnostic_codes::UNEXPANDED_PLACEHOLDER, &[leftover.as_str()]);
    }
    inject_literals(&decoded, literals)
}

#[cfg(test)]
#[path = "../tests/finish_tests.rs"]
mod tests;
