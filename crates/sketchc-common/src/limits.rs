//! Centralized limits and thresholds for the transpiler.
//!
//! The pipeline is built from regex rewrites and bracket scans that run until
//! nothing more matches. None of those loops has an intrinsic bound, so every
//! one of them consults a constant from this module.
//!
//! # Categories
//!
//! - **Nesting**: bracket depth accepted by the atom splitter
//! - **Fixed-point passes**: generics erasure, method proxying, `instanceof`
//! - **Hierarchy walks**: member collection along `extends` chains
//! - **Input size**: the largest source accepted by one compilation

// =============================================================================
// Nesting Limits
// =============================================================================

/// Maximum bracket nesting depth accepted by the atom splitter.
///
/// Expansion of atoms back into text recurses once per nesting level, and so
/// does class-body extraction, so this also bounds stack usage downstream.
/// Exceeding it is a structural error, not a diagnostic.
///
/// ```java
/// int x = ((((((((((((1))))))))))));   // depth 12, fine
/// ```
pub const MAX_BRACKET_DEPTH: usize = 256;

// =============================================================================
// Fixed-Point Limits
// =============================================================================

/// Maximum passes of any rewrite that loops until no further match.
///
/// Generics erasure removes one nesting level per pass, Java method proxying
/// peels one call off a receiver chain per pass. Real sketches settle in a
/// handful of passes; hitting this limit reports `REWRITE_LIMIT_REACHED`.
///
/// ```java
/// Map<String, List<Set<Integer>>> m;        // three erasure passes
/// a.trim().split(",")[0].equals(b);         // two proxy passes
/// ```
pub const MAX_REWRITE_PASSES: usize = 64;

// =============================================================================
// Hierarchy Limits
// =============================================================================

/// Maximum length of an `extends` chain followed when collecting inherited
/// fields, methods and inner classes.
///
/// A cyclic hierarchy (`class A extends B`, `class B extends A`) is reported by
/// the weighting phase; this limit keeps member collection finite meanwhile.
pub const MAX_INHERITANCE_DEPTH: usize = 64;

// =============================================================================
// Input Limits
// =============================================================================

/// Largest source text, in bytes, accepted by a single compilation.
pub const MAX_SOURCE_LEN: usize = 16 * 1024 * 1024;
