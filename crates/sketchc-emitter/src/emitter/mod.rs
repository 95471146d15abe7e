//! Printer - renders the linked syntax tree.
//!
//! Every node renders against a `Scope` passed in by its parent. The printer
//! itself only carries what is shared by the whole compilation unit: the
//! class registry (weights, links, member summaries), the host member table,
//! the for-each iterator counter and the diagnostics reported while
//! rendering.

mod classes;
mod expressions;
mod statements;

use std::cmp::Reverse;

use sketchc_common::{DiagnosticBag, HOST_HANDLE, HostMembers};
use sketchc_parser::ClassRegistry;
use sketchc_parser::ast::{ClassDecl, Params, Root, Statement, local_names};
use tracing::debug;

use crate::scope::Scope;

pub(crate) const AUTOGENERATED_HEADER: &str = "// this code was autogenerated from PJS\n";

#[derive(Clone, Copy, Debug)]
pub struct PrintOptions {
    /// Start the output with the autogenerated-code comment.
    pub autogenerated_header: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            autogenerated_header: true,
        }
    }
}

pub struct Printer<'a> {
    registry: &'a ClassRegistry,
    host: &'a HostMembers,
    options: PrintOptions,
    /// Number of the next for-each iterator (`$itN`).
    iterator_count: usize,
    diagnostics: DiagnosticBag,
}

impl<'a> Printer<'a> {
    pub fn new(registry: &'a ClassRegistry, host: &'a HostMembers) -> Self {
        Self {
            registry,
            host,
            options: PrintOptions::default(),
            iterator_count: 0,
            diagnostics: DiagnosticBag::new(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: PrintOptions) -> Self {
        self.options = options;
        self
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticBag {
        self.diagnostics
    }

    // =========================================================================
    // Root
    // =========================================================================

    /// The whole unit as one function taking the host object. Classes come
    /// first, heaviest first, then every other top-level statement in source
    /// order.
    pub fn print_root(&mut self, root: &Root) -> String {
        let scope = Scope::root(local_names(&root.statements), self.host);

        let mut classes: Vec<&ClassDecl> = Vec::new();
        let mut others: Vec<&Statement> = Vec::new();
        for statement in &root.statements {
            match statement {
                Statement::Class(decl) => classes.push(decl),
                other => others.push(other),
            }
        }
        classes.sort_by_key(|decl| Reverse(self.registry.weight(decl.id)));

        let mut out = String::new();
        if self.options.autogenerated_header {
            out.push_str(AUTOGENERATED_HEADER);
        }
        out.push_str(&format!("(function({HOST_HANDLE}) {{\n"));
        for decl in &classes {
            out.push_str(&self.print_global_class(decl, &scope));
        }
        out.push('\n');
        for statement in others {
            out.push_str(&self.print_statement(statement, &scope));
        }
        out.push_str("\n})");

        debug!(
            classes = classes.len(),
            iterators = self.iterator_count,
            bytes = out.len(),
            "rendered root"
        );
        out
    }

    // =========================================================================
    // Shared helpers
    // =========================================================================

    fn next_iterator_id(&mut self) -> String {
        let id = format!("$it{}", self.iterator_count);
        self.iterator_count += 1;
        id
    }
}

/// `(a, b)`: fixed parameters only; a rest parameter is read from
/// `arguments` by the body.
fn params_list(params: &Params) -> String {
    let names: Vec<&str> = params.params.iter().map(|p| p.name.as_str()).collect();
    format!("({})", names.join(", "))
}

/// Prepend the rest-parameter initialisation to a rendered `{...}` body.
fn with_rest_param(params: &Params, body: String) -> String {
    match &params.rest {
        Some(rest) => format!(
            "{{\nvar {} = Array.prototype.slice.call(arguments, {});\n{}",
            rest.name,
            params.len(),
            body.strip_prefix('{').unwrap_or(&body)
        ),
        None => body,
    }
}

#[cfg(test)]
#[path = "../../tests/printer_tests.rs"]
mod tests;
