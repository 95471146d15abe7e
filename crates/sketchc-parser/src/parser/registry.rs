//! DeclaredClass registry.
//!
//! Every class, interface and anonymous class found during extraction gets a
//! `ClassId` and an entry here. The extractor fills in names, the enclosing
//! class and a summary of declared members; the binder later fills in the
//! linked base class, interfaces, reverse edges and render weight.

use rustc_hash::{FxHashMap, FxHashSet};
use sketchc_common::limits::MAX_INHERITANCE_DEPTH;

/// Index of a declaration in the `ClassRegistry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    /// Anonymous class created by `new Type(...) {...}`.
    Inline,
}

/// Members declared directly in one class body, or merged along a base chain.
#[derive(Clone, Debug, Default)]
pub struct ClassMembers {
    /// Field name to static flag.
    pub fields: FxHashMap<String, bool>,
    /// Method name to static flag. Overloads share one entry.
    pub methods: FxHashMap<String, bool>,
    pub inner_classes: FxHashSet<String>,
}

impl ClassMembers {
    /// Overlay `other` on top of `self`; entries of `other` win.
    fn overlay(&mut self, other: &ClassMembers) {
        self.fields
            .extend(other.fields.iter().map(|(name, s)| (name.clone(), *s)));
        self.methods
            .extend(other.methods.iter().map(|(name, s)| (name.clone(), *s)));
        self.inner_classes
            .extend(other.inner_classes.iter().cloned());
    }
}

#[derive(Clone, Debug)]
pub struct DeclaredClass {
    pub name: String,
    pub kind: ClassKind,
    /// Enclosing class, `None` at the top level.
    pub scope: Option<ClassId>,
    /// `extends` name as written (dotted names allowed).
    pub base_name: Option<String>,
    /// `implements` names, or `extends` names for an interface.
    pub interface_names: Vec<String>,
    pub members: ClassMembers,

    // Filled in by the binder.
    pub base: Option<ClassId>,
    /// Parallel to `interface_names`; `None` for unresolved names.
    pub interfaces: Vec<Option<ClassId>>,
    /// Classes whose base or interfaces resolved to this one.
    pub derived: Vec<ClassId>,
    /// Classes declared directly inside this one.
    pub children: Vec<ClassId>,
    /// Named (non-anonymous) children, for dotted-name lookup.
    pub named_children: FxHashMap<String, ClassId>,
    /// Render order rank: higher renders earlier.
    pub weight: u32,
}

impl DeclaredClass {
    pub fn new(name: impl Into<String>, kind: ClassKind, scope: Option<ClassId>) -> Self {
        Self {
            name: name.into(),
            kind,
            scope,
            base_name: None,
            interface_names: Vec::new(),
            members: ClassMembers::default(),
            base: None,
            interfaces: Vec::new(),
            derived: Vec::new(),
            children: Vec::new(),
            named_children: FxHashMap::default(),
            weight: 0,
        }
    }

    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface)
    }
}

/// Compilation-scoped table of declared classes.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: Vec<DeclaredClass>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, class: DeclaredClass) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(class);
        id
    }

    pub fn get(&self, id: ClassId) -> Option<&DeclaredClass> {
        self.classes.get(id.index())
    }

    pub fn get_mut(&mut self, id: ClassId) -> Option<&mut DeclaredClass> {
        self.classes.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ClassId> + use<> {
        (0..self.classes.len() as u32).map(ClassId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &DeclaredClass)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| (ClassId(index as u32), class))
    }

    pub fn weight(&self, id: ClassId) -> u32 {
        self.get(id).map_or(0, |class| class.weight)
    }

    /// Number of classes from `id` out to the top level, `id` included.
    /// A top-level class has level 1.
    pub fn scope_level(&self, id: ClassId) -> usize {
        let mut level = 0;
        let mut current = Some(id);
        while let Some(class_id) = current {
            level += 1;
            if level > self.classes.len() {
                break;
            }
            current = self.get(class_id).and_then(|class| class.scope);
        }
        level
    }

    /// Members visible in the body of `id`: its own members over those
    /// inherited along the `base` chain. The walk stops at
    /// `MAX_INHERITANCE_DEPTH` or when a class repeats.
    pub fn collect_members(&self, id: ClassId) -> ClassMembers {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = Some(id);
        while let Some(class_id) = current {
            if chain.len() >= MAX_INHERITANCE_DEPTH || !seen.insert(class_id) {
                break;
            }
            let Some(class) = self.get(class_id) else {
                break;
            };
            chain.push(class);
            current = class.base;
        }

        let mut merged = ClassMembers::default();
        for class in chain.iter().rev() {
            merged.overlay(&class.members);
        }
        merged
    }
}

#[cfg(test)]
#[path = "../../tests/registry.rs"]
mod tests;
