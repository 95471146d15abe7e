//! Emitter for the sketchc transpiler.
//!
//! Renders the linked syntax tree as output-dialect text:
//! - `scope` - immutable layered name resolution (`Scope`, `Layer`, `Subject`)
//! - `emitter` - the `Printer`, one render method per node kind
//! - `finish` - blank-line collapsing, marker decoding and literal
//!   re-injection
//!
//! All state that outlives a single node (the for-each iterator counter,
//! rendering diagnostics) belongs to one `Printer`, so two compilations
//! never share it.

pub mod emitter;
pub mod finish;
pub mod scope;

pub use emitter::{PrintOptions, Printer};
pub use finish::finish;
pub use scope::{ClassLayer, Layer, Scope, Subject};

use sketchc_common::{Diagnostic, HostMembers};
use sketchc_parser::ClassRegistry;
use sketchc_parser::ast::Root;

/// Render `root`. The registry must be linked and weighted.
pub fn print_root(
    root: &Root,
    registry: &ClassRegistry,
    host: &HostMembers,
    options: PrintOptions,
) -> (String, Vec<Diagnostic>) {
    let mut printer = Printer::new(registry, host).with_options(options);
    let text = printer.print_root(root);
    (text, printer.into_diagnostics().into_vec())
}
