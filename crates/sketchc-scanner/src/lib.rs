//! Scanner phase for the sketchc transpiler.
//!
//! This crate turns raw sketch source into flat, placeholder-masked text:
//! - `mask` - comments removed, string/regex literals moved to a `LiteralTable`
//! - `markers` - neutralisation of the `$` and `__xHHHH` marker characters
//! - `generics` - fixed-point erasure of generic parameter lists
//! - `atoms` - explicit-stack splitting of balanced brackets into an `AtomTable`
//! - `placeholder` - the placeholder token grammar shared by later phases
//! - `inject` - re-injection of literals into the rendered output

pub mod atoms;
pub mod error;
pub mod generics;
pub mod inject;
pub mod markers;
pub mod mask;
pub mod placeholder;

pub use atoms::{AtomTable, split_to_atoms};
pub use error::ScanError;
pub use generics::erase_generics;
pub use inject::inject_literals;
pub use markers::{decode_markers, encode_markers, join_return_lines};
pub use mask::{LiteralKind, LiteralRecord, LiteralTable, MaskedSource, mask_literals, mask_source};
pub use placeholder::AtomKind;

/// Result of a rewrite that runs until no further match is found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedPoint {
    pub text: String,
    pub passes: usize,
    /// False when the pass limit was hit before the text stopped changing.
    pub settled: bool,
}
