//! `/* @pjs ... */` directive blocks.
//!
//! A sketch may carry settings for the runner that loads it, written in a
//! comment so the sketch stays valid source:
//!
//! ```text
//! /* @pjs preload="bg.png,logo.png"; crisp=true; pauseOnBlur; */
//! ```
//!
//! Directives are read from the raw source, before comments are stripped,
//! and handed back untouched by the compiler.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DIRECTIVE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*\s*@pjs\s+((?:[^*]|\*+[^*/])*)\*+/").expect("valid regex"));

static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s*]*([\w$]+)\s*(?:=\s*(.*?))?\s*$").expect("valid regex"));

/// One `key=value` pair. A bare key has the value `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SketchDirective {
    pub key: String,
    pub value: String,
}

/// Directives in source order. Keys may repeat; `get` returns the last one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SketchDirectives {
    entries: Vec<SketchDirective>,
}

impl SketchDirectives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// True when the key is present and not set to `false`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| value != "false")
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SketchDirective> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, key: &str, value: &str) {
        self.entries.push(SketchDirective {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}

/// Source with its directive blocks taken out.
#[derive(Clone, Debug)]
pub struct ExtractedDirectives {
    pub source: String,
    pub directives: SketchDirectives,
}

/// Parse every directive block of `source`. With `strip`, the blocks are
/// removed from the returned source; otherwise it is returned as is (the
/// comment stripper drops them later anyway).
pub fn extract_directives(source: &str, strip: bool) -> ExtractedDirectives {
    let mut directives = SketchDirectives::new();
    for caps in DIRECTIVE_BLOCK_RE.captures_iter(source) {
        for piece in caps[1].split(';') {
            let Some(directive) = DIRECTIVE_RE.captures(piece) else {
                continue;
            };
            let value = directive.get(2).map_or("true", |m| unquote(m.as_str()));
            directives.push(&directive[1], value);
        }
    }

    let source = if strip && !directives.is_empty() {
        DIRECTIVE_BLOCK_RE.replace_all(source, "").into_owned()
    } else {
        source.to_string()
    };
    ExtractedDirectives { source, directives }
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(b'"'), Some(b'"')) | (Some(b'\''), Some(b'\'')) if value.len() >= 2 => {
            &value[1..value.len() - 1]
        }
        _ => value,
    }
}

#[cfg(test)]
#[path = "tests/directives_tests.rs"]
mod tests;
