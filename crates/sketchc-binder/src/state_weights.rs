//! Binder state - render order.
//!
//! A class must be rendered after everything that depends on it being
//! complete: the classes nested in it and the classes deriving from it.
//! Weights are assigned breadth-first from classes nothing depends on; each
//! target keeps a countdown list of dependents still to be weighted and is
//! queued once the list drains. Higher weight renders earlier.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use sketchc_common::diagnostic_codes;
use sketchc_parser::ClassId;
use tracing::{debug, warn};

use super::state::BinderState;

impl BinderState<'_> {
    pub fn assign_weights(&mut self) {
        let mut queue = VecDeque::new();
        let mut waiting: FxHashMap<ClassId, Vec<ClassId>> = FxHashMap::default();

        for (id, class) in self.registry.iter() {
            if class.children.is_empty() && class.derived.is_empty() {
                queue.push_back(id);
            } else {
                let mut dependents = class.children.clone();
                dependents.extend_from_slice(&class.derived);
                waiting.insert(id, dependents);
            }
        }
        for id in &queue {
            if let Some(class) = self.registry.get_mut(*id) {
                class.weight = 0;
            }
        }

        while let Some(id) = queue.pop_front() {
            let Some(class) = self.registry.get(id) else {
                continue;
            };
            let weight = class.weight;
            let targets: Vec<ClassId> = class
                .scope
                .iter()
                .chain(class.base.iter())
                .chain(class.interfaces.iter().flatten())
                .copied()
                .collect();

            for target in targets {
                let Some(dependents) = waiting.get_mut(&target) else {
                    continue;
                };
                if let Some(pos) = dependents.iter().position(|&d| d == id) {
                    dependents.swap_remove(pos);
                }
                if dependents.is_empty() {
                    waiting.remove(&target);
                    if let Some(target_class) = self.registry.get_mut(target) {
                        target_class.weight = weight + 1;
                    }
                    queue.push_back(target);
                }
            }
        }

        if !waiting.is_empty() {
            let mut stuck: Vec<ClassId> = waiting.into_keys().collect();
            stuck.sort_unstable();
            let names: Vec<&str> = stuck
                .iter()
                .filter_map(|&id| self.registry.get(id))
                .map(|class| class.name.as_str())
                .collect();
            let names = names.join(", ");
            warn!(classes = %names, "inheritance cycle");
            self.diagnostics
                .report(diagnostic_codes::INHERITANCE_CYCLE, &[&names]);
        }

        debug!(classes = self.registry.len(), "assigned render weights");
    }
}

#[cfg(test)]
#[path = "../tests/weights_tests.rs"]
mod tests;
