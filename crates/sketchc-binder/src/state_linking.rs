//! Binder state - scope membership and inheritance links.

use rustc_hash::FxHashMap;
use sketchc_common::diagnostic_codes;
use sketchc_parser::{ClassId, ClassKind};
use tracing::{debug, trace};

use super::state::BinderState;

impl BinderState<'_> {
    /// Fill `children`/`named_children`, then resolve every `extends` and
    /// `implements` name. Safe to run once per registry.
    pub fn link(&mut self) {
        let globals = self.bind_scopes();
        let mut unresolved = 0usize;

        for id in self.registry.ids() {
            let Some(class) = self.registry.get(id) else {
                continue;
            };
            let base_name = class.base_name.clone();
            let interface_names = class.interface_names.clone();
            let referrer = class.name.clone();

            let base = base_name.as_deref().and_then(|name| {
                let found = self.find_in_scopes(id, name, &globals);
                if found.is_none() {
                    self.report_unresolved(name, &referrer);
                    unresolved += 1;
                }
                found
            });
            let interfaces: Vec<Option<ClassId>> = interface_names
                .iter()
                .map(|name| {
                    let found = self.find_in_scopes(id, name, &globals);
                    if found.is_none() {
                        self.report_unresolved(name, &referrer);
                        unresolved += 1;
                    }
                    found
                })
                .collect();

            for target in base.iter().chain(interfaces.iter().flatten()) {
                if let Some(target_class) = self.registry.get_mut(*target) {
                    target_class.derived.push(id);
                }
            }
            if let Some(class) = self.registry.get_mut(id) {
                class.base = base;
                class.interfaces = interfaces;
            }
            trace!(class = %referrer, base = ?base, "linked");
        }

        debug!(
            classes = self.registry.len(),
            globals = globals.len(),
            unresolved,
            "linked class registry"
        );
    }

    /// Record every class in its enclosing class. Returns the top-level
    /// names. The first declaration of a name wins.
    fn bind_scopes(&mut self) -> FxHashMap<String, ClassId> {
        let mut globals = FxHashMap::default();
        for id in self.registry.ids() {
            let Some(class) = self.registry.get(id) else {
                continue;
            };
            let named = class.kind != ClassKind::Inline;
            let name = class.name.clone();
            let scope = class.scope;
            match scope {
                Some(scope) => {
                    if let Some(scope_class) = self.registry.get_mut(scope) {
                        scope_class.children.push(id);
                        if named {
                            scope_class.named_children.entry(name).or_insert(id);
                        }
                    }
                }
                None if named => {
                    globals.entry(name).or_insert(id);
                }
                None => {}
            }
        }
        globals
    }

    /// Resolve a possibly dotted class name as seen from inside `referrer`:
    /// the first segment is searched in the enclosing classes outward, then
    /// at the top level; later segments walk named children.
    pub(crate) fn find_in_scopes(
        &self,
        referrer: ClassId,
        name: &str,
        globals: &FxHashMap<String, ClassId>,
    ) -> Option<ClassId> {
        let mut parts = name.split('.').map(str::trim);
        let first = parts.next()?;

        let mut found = None;
        let mut scope = self.registry.get(referrer).and_then(|class| class.scope);
        let mut steps = 0;
        while let Some(scope_id) = scope {
            let Some(scope_class) = self.registry.get(scope_id) else {
                break;
            };
            if let Some(&id) = scope_class.named_children.get(first) {
                found = Some(id);
                break;
            }
            steps += 1;
            if steps > self.registry.len() {
                break;
            }
            scope = scope_class.scope;
        }
        let mut found = found.or_else(|| globals.get(first).copied())?;

        for part in parts {
            found = *self.registry.get(found)?.named_children.get(part)?;
        }
        Some(found)
    }

    fn report_unresolved(&mut self, name: &str, referrer: &str) {
        self.diagnostics
            .report(diagnostic_codes::UNRESOLVED_BASE, &[name, referrer]);
    }
}

#[cfg(test)]
#[path = "../tests/linking_tests.rs"]
mod tests;
