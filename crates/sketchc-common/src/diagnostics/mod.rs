//! Diagnostic types and message lookup for the transpiler.
//!
//! Message templates live in `data.rs`. Every recoverable problem found while
//! masking, extracting, resolving or rendering is reported as a `Diagnostic`;
//! only structural failures (unbalanced delimiters) abort a compilation.

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Suggestion => "suggestion",
            Self::Message => "message",
        }
    }
}

/// A transpiler diagnostic.
///
/// `offset` is a byte offset into the masked source when the reporting phase
/// still knows one; later phases work on atom-masked text and leave it empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    pub message_text: String,
}

impl Diagnostic {
    /// Create a diagnostic from a registered code, filling `{0}`, `{1}`, ...
    /// in its template. Unknown codes fall back to the joined arguments.
    #[must_use]
    pub fn from_code(code: u32, args: &[&str]) -> Self {
        let (category, message_text) = match get_diagnostic_message(code) {
            Some(msg) => (msg.category, format_message(msg.message, args)),
            None => (DiagnosticCategory::Error, args.join(" ")),
        };
        Self {
            category,
            code,
            offset: None,
            message_text,
        }
    }

    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(code: u32, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            offset: None,
            message_text: message.into(),
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub fn warning(code: u32, message: impl Into<String>) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            code,
            offset: None,
            message_text: message.into(),
        }
    }

    #[must_use]
    pub const fn at(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} SK{}: {}", self.category.as_str(), self.code, self.message_text)?;
        if let Some(offset) = self.offset {
            write!(f, " (at offset {offset})")?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics produced by one compilation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticBag {
    items: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Report a registered code with template arguments.
    pub fn report(&mut self, code: u32, args: &[&str]) {
        self.items.push(Diagnostic::from_code(code, args));
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

#[cfg(test)]
#[path = "../../tests/diagnostics.rs"]
mod tests;
