//! Common types and utilities for the sketchc transpiler.
//!
//! This crate provides foundational types used across all sketchc crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, `DiagnosticBag`) and codes
//! - Centralized limits for fixed-point loops and nesting guards
//! - The host runtime surface the generated code is bound to

// Diagnostics - structured, recoverable problems reported to the caller
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCategory, diagnostic_codes};

// Centralized limits and thresholds
pub mod limits;

// Host runtime handle and the names it provides
pub mod host;
pub use host::{HOST_HANDLE, HostMembers};
