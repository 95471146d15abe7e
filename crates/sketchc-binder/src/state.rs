//! Binder state.

use sketchc_common::{Diagnostic, DiagnosticBag};
use sketchc_parser::ClassRegistry;

pub struct BinderState<'a> {
    pub(crate) registry: &'a mut ClassRegistry,
    pub(crate) diagnostics: DiagnosticBag,
}

impl<'a> BinderState<'a> {
    pub fn new(registry: &'a mut ClassRegistry) -> Self {
        Self {
            registry,
            diagnostics: DiagnosticBag::new(),
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_vec()
    }
}
