use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use crate::{Diagnostic, DiagnosticCategory};

/// Renders diagnostics for the terminal or as JSON lines.
pub struct Reporter {
    color: bool,
    json: bool,
}

/// One JSON line: the diagnostic plus the file it belongs to.
#[derive(Serialize)]
struct FileDiagnostic<'a> {
    file: &'a str,
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
}

impl Reporter {
    pub const fn new(color: bool, json: bool) -> Self {
        Self { color, json }
    }

    /// Every diagnostic of one file, one per line, no trailing newline.
    pub fn render(&self, file: &Path, diagnostics: &[Diagnostic]) -> String {
        let file = file.display().to_string();
        diagnostics
            .iter()
            .map(|diagnostic| {
                if self.json {
                    self.format_json(&file, diagnostic)
                } else {
                    self.format_diagnostic(&file, diagnostic)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_diagnostic(&self, file: &str, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        output.push_str(file);
        if let Some(offset) = diagnostic.offset {
            output.push_str(&format!(":{offset}"));
        }
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// A failure that stopped the file from compiling at all.
    pub fn format_failure(&self, file: &Path, message: &str) -> String {
        let file = file.display().to_string();
        if self.json {
            return serde_json::json!({
                "file": file,
                "category": "error",
                "messageText": message,
            })
            .to_string();
        }
        format!(
            "{file} - {}: {message}",
            self.format_category(DiagnosticCategory::Error)
        )
    }

    fn format_json(&self, file: &str, diagnostic: &Diagnostic) -> String {
        serde_json::to_string(&FileDiagnostic { file, diagnostic })
            .unwrap_or_else(|_| diagnostic.message_text.clone())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("SK{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
