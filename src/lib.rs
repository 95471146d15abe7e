//! sketchc: transpiles Processing sketches into a script bound to the host
//! runtime handle `$p`.
//!
//! The phases live in their own crates:
//! - `sketchc-scanner` - literal masking, generics erasure, atom splitting
//! - `sketchc-parser` - statement and class extraction, expression rewrites
//! - `sketchc-binder` - class linking and render order
//! - `sketchc-emitter` - scope-resolved rendering and output finishing
//!
//! This crate wires them into [`compile`] and carries the pieces around it:
//! compiler options, `@pjs` directives, tracing setup and the CLI.

pub mod config;
pub mod directives;
pub mod pipeline;
pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::CompilerOptions;
pub use directives::{SketchDirective, SketchDirectives, extract_directives};
pub use pipeline::{CompileError, CompileOutput, compile};
pub use sketchc_common::{Diagnostic, DiagnosticCategory};
