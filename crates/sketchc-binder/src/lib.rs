//! Binder for the sketchc transpiler.
//!
//! Runs over the `ClassRegistry` once the whole syntax tree exists:
//! - linking: scope membership, then `extends`/`implements` names resolved
//!   to declared classes
//! - weighting: a render order in which every class is emitted after the
//!   classes nested in it and after the classes that derive from it, so the
//!   flat output never refers to a class factory before it ran
//!
//! Names that do not resolve are left unlinked; the runtime may provide them.

mod state;
mod state_linking;
mod state_weights;

pub use state::BinderState;

use sketchc_common::Diagnostic;
use sketchc_parser::ClassRegistry;

/// Link scopes, base classes and interfaces.
pub fn link(registry: &mut ClassRegistry) -> Vec<Diagnostic> {
    let mut binder = BinderState::new(registry);
    binder.link();
    binder.into_diagnostics()
}

/// Assign render weights. Requires `link` to have run.
pub fn assign_weights(registry: &mut ClassRegistry) -> Vec<Diagnostic> {
    let mut binder = BinderState::new(registry);
    binder.assign_weights();
    binder.into_diagnostics()
}

/// Link, then weight.
pub fn resolve(registry: &mut ClassRegistry) -> Vec<Diagnostic> {
    let mut binder = BinderState::new(registry);
    binder.link();
    binder.assign_weights();
    binder.into_diagnostics()
}
