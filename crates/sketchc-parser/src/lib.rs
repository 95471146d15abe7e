//! Statement and class extractor for the sketchc transpiler.
//!
//! Works on the atom table produced by the scanner and builds:
//! - `parser::ast` - the typed node tree (statements, classes, expressions)
//! - `parser::registry` - every declared class, interface and anonymous
//!   class, with the member summary later used for name resolution
//!
//! Expressions are pre-transformed (dialect desugaring) while they are
//! extracted, so the tree only holds text in the output dialect plus
//! deferred nested declarations.

pub mod parser;
pub mod syntax;

pub use parser::ast;
pub use parser::registry::{ClassId, ClassKind, ClassMembers, ClassRegistry, DeclaredClass};
pub use parser::state::{ParseResult, ParserState, parse};
pub use parser::state_statements::{default_value_for_type, parse_params};
