//! One compilation, from sketch source to output text.
//!
//! Every table a compilation builds (literals, atoms, the class registry,
//! the for-each counter) is created here and dropped with it, so separate
//! `compile` calls can run on separate threads.

use serde::Serialize;
use sketchc_common::limits::MAX_SOURCE_LEN;
use sketchc_common::{Diagnostic, DiagnosticBag, DiagnosticCategory, diagnostic_codes};
use sketchc_emitter::{finish, print_root};
use sketchc_parser::{ParseResult, parse};
use sketchc_scanner::{ScanError, erase_generics, mask_source, split_to_atoms};
use thiserror::Error;
use tracing::{debug, info_span};

use crate::config::CompilerOptions;
use crate::directives::{ExtractedDirectives, SketchDirectives, extract_directives};

/// Failures that leave nothing to render.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("source is {len} bytes; the limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },

    #[error(transparent)]
    Scan(#[from] ScanError),
}

#[derive(Clone, Debug, Serialize)]
pub struct CompileOutput {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
    pub directives: SketchDirectives,
}

impl CompileOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Compile one sketch.
pub fn compile(source: &str, options: &CompilerOptions) -> Result<CompileOutput, CompileError> {
    let _span = info_span!("compile", bytes = source.len()).entered();
    if source.len() > MAX_SOURCE_LEN {
        return Err(CompileError::InputTooLarge {
            len: source.len(),
            limit: MAX_SOURCE_LEN,
        });
    }

    let ExtractedDirectives { source, directives } =
        extract_directives(source, options.strip_directives);
    let mut diagnostics = DiagnosticBag::new();

    let masked = mask_source(&source);
    diagnostics.extend(masked.diagnostics.iter().cloned());
    debug!(literals = masked.literals.len(), "masked");

    let erased = erase_generics(&masked.text);
    if !erased.settled {
        diagnostics.report(
            diagnostic_codes::REWRITE_LIMIT_REACHED,
            &["generics", &erased.passes.to_string()],
        );
    }

    let mut atoms = split_to_atoms(&erased.text)?;
    debug!(atoms = atoms.len(), "split");

    let ParseResult {
        root,
        mut registry,
        diagnostics: parse_diagnostics,
    } = parse(&mut atoms);
    diagnostics.extend(parse_diagnostics.into_vec());
    diagnostics.extend(sketchc_binder::resolve(&mut registry));
    debug!(classes = registry.len(), "resolved");

    let host = options.host_members();
    let (rendered, render_diagnostics) =
        print_root(&root, &registry, &host, options.print_options());
    diagnostics.extend(render_diagnostics);

    let code = finish(&rendered, &masked.literals, &mut diagnostics);

    let mut diagnostics = diagnostics.into_vec();
    if options.treat_warnings_as_errors {
        for diagnostic in &mut diagnostics {
            if diagnostic.category == DiagnosticCategory::Warning {
                diagnostic.category = DiagnosticCategory::Error;
            }
        }
    }
    debug!(
        bytes = code.len(),
        diagnostics = diagnostics.len(),
        directives = directives.len(),
        "compiled"
    );

    Ok(CompileOutput {
        code,
        diagnostics,
        directives,
    })
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
