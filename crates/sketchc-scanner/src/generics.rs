//! Generics eraser.
//!
//! The output dialect has no type parameters, so every well-formed generic
//! parameter list is removed: `<T>`, `<T extends U>`, `<?>`, `<K, V>`,
//! `<int[]>`, `<a.b.C>`. Inner lists are removed first; removing them exposes
//! the enclosing list, so the rewrite runs to a fixed point.
//!
//! A list is left alone when its `<` is doubled (`<<`) or its `>` is followed
//! by `=`, and comparison operators never have the required shape
//! (`a < b && c > d` is not a parameter list).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchc_common::limits::MAX_REWRITE_PASSES;
use tracing::{debug, trace};

use crate::FixedPoint;

const QNAME: &str = r"[A-Za-z_$][\w$]*\b(?:\s*\.\s*[A-Za-z_$][\w$]*\b)*";

static GENERIC_PARAMS_RE: Lazy<Regex> = Lazy::new(|| {
    let param = format!(r"(?:\?|{QNAME})(?:\[\])*(?:\s+(?:extends|super)\s+{QNAME})?");
    let pattern = format!(r"(<?)<\s*({param}(?:\s*,\s*{param})*)\s*>(=?)");
    Regex::new(&pattern).expect("valid regex")
});

/// Remove generic parameter lists until nothing more can be removed.
pub fn erase_generics(text: &str) -> FixedPoint {
    let mut current = text.to_string();
    for pass in 1..=MAX_REWRITE_PASSES {
        let mut removed = false;
        let next = GENERIC_PARAMS_RE.replace_all(&current, |caps: &Captures<'_>| {
            if !caps[1].is_empty() || !caps[3].is_empty() {
                return caps[0].to_string();
            }
            trace!(params = &caps[2], "erasing generic parameters");
            removed = true;
            String::new()
        })
        .into_owned();
        if !removed {
            debug!(passes = pass, "generics erased");
            return FixedPoint {
                text: current,
                passes: pass,
                settled: true,
            };
        }
        current = next;
    }
    FixedPoint {
        text: current,
        passes: MAX_REWRITE_PASSES,
        settled: false,
    }
}

#[cfg(test)]
#[path = "../tests/generics.rs"]
mod tests;
