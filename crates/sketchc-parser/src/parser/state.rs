//! Parser state shared by the statement, declaration and expression passes.
//!
//! The extractor works top-down over the atom table: it recognizes
//! declarations and statements in the flat text of one atom, and recurses
//! into the atoms those reference. New atoms created along the way (method
//! and class declarations, anonymous classes, function literals, rewritten
//! call arguments) are appended to the same table.

use sketchc_common::{DiagnosticBag, diagnostic_codes};
use sketchc_scanner::{AtomKind, AtomTable};
use tracing::debug;

use crate::parser::ast::Root;
use crate::parser::registry::{ClassId, ClassRegistry};
use crate::syntax::patterns::atom_index;

/// Everything the extractor produces for one compilation unit.
#[derive(Debug, Default)]
pub struct ParseResult {
    pub root: Root,
    pub registry: ClassRegistry,
    pub diagnostics: DiagnosticBag,
}

pub struct ParserState<'a> {
    pub(crate) atoms: &'a mut AtomTable,
    pub(crate) registry: ClassRegistry,
    pub(crate) diagnostics: DiagnosticBag,
    /// Class whose body is being extracted; owner of nested declarations.
    pub(crate) current_class: Option<ClassId>,
}

impl<'a> ParserState<'a> {
    pub fn new(atoms: &'a mut AtomTable) -> Self {
        Self {
            atoms,
            registry: ClassRegistry::new(),
            diagnostics: DiagnosticBag::new(),
            current_class: None,
        }
    }

    /// Extract the whole tree from the table's top-level entry.
    pub fn parse_root(mut self) -> ParseResult {
        let top = self.atoms.top_level().to_string();
        let statements = self.parse_root_statements(&top);
        debug!(
            statements = statements.len(),
            classes = self.registry.len(),
            atoms = self.atoms.len(),
            "extracted syntax tree"
        );
        ParseResult {
            root: Root { statements },
            registry: self.registry,
            diagnostics: self.diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    // =========================================================================
    // Atom access
    // =========================================================================

    /// Text of atom `index`. A reference outside the table is reported and
    /// reads as empty text.
    pub(crate) fn atom_text(&mut self, index: usize) -> String {
        match self.atoms.get(index) {
            Some(text) if index > 0 => text.to_string(),
            _ => {
                self.diagnostics.report(
                    diagnostic_codes::DANGLING_REFERENCE,
                    &[&format!("#{index}")],
                );
                String::new()
            }
        }
    }

    /// Text of the atom a placeholder token such as `"B3"` stands for.
    pub(crate) fn atom_for(&mut self, token: &str) -> String {
        match atom_index(token) {
            Some(index) => self.atom_text(index),
            None => {
                self.diagnostics
                    .report(diagnostic_codes::DANGLING_REFERENCE, &[token]);
                String::new()
            }
        }
    }

    pub(crate) fn push_atom(&mut self, text: impl Into<String>, kind: AtomKind) -> String {
        self.atoms.push(text, kind)
    }
}

/// `text` without its first and last character, for `{...}`, `(...)` and
/// `[...]` atoms.
pub(crate) fn strip_delimiters(text: &str) -> &str {
    let mut chars = text.chars();
    if chars.next().is_none() || chars.next_back().is_none() {
        return "";
    }
    chars.as_str()
}

/// Extract the syntax tree from an atom table.
pub fn parse(atoms: &mut AtomTable) -> ParseResult {
    ParserState::new(atoms).parse_root()
}
