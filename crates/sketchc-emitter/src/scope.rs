//! Name resolution scopes.
//!
//! A `Scope` is one layer plus a pointer to the enclosing scope. Renderers
//! push a layer for the node they enter and pass the new scope down; nothing
//! is mutated on the way back out. Resolution walks outward until a layer
//! claims the name:
//!
//! - `Root`: names declared at the top level stay as written, host members
//!   are qualified with the host handle
//! - `Locals`: parameters and block-local declarations stay as written
//! - `KeepThis`: `this` inside an object literal is the literal itself
//! - `Class`: `this`, fields, methods and inner classes of a class body
//!   (inherited ones included) are qualified with the instance or the class

use rustc_hash::FxHashSet;
use sketchc_common::{HOST_HANDLE, HostMembers};
use sketchc_parser::ClassMembers;

/// An identifier found in expression text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subject<'s> {
    pub name: &'s str,
    /// Member accessed right after the name (`name.member`).
    pub member: Option<&'s str>,
    /// True when the member access is called (`name.member(`).
    pub call_sign: bool,
}

impl<'s> Subject<'s> {
    pub const fn bare(name: &'s str) -> Self {
        Self {
            name,
            member: None,
            call_sign: false,
        }
    }
}

/// Class body layer.
#[derive(Debug)]
pub struct ClassLayer<'a> {
    /// Instance alias, `$this_N` with N the nesting level.
    pub self_id: String,
    pub class_name: &'a str,
    /// Own members over inherited ones.
    pub members: ClassMembers,
}

#[derive(Debug)]
pub enum Layer<'a> {
    Root {
        locals: FxHashSet<&'a str>,
        host: &'a HostMembers,
    },
    Locals(FxHashSet<&'a str>),
    KeepThis,
    Class(ClassLayer<'a>),
}

impl<'a> Layer<'a> {
    pub fn locals(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self::Locals(names.into_iter().collect())
    }
}

#[derive(Debug)]
pub struct Scope<'a> {
    layer: Layer<'a>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn root(locals: impl IntoIterator<Item = &'a str>, host: &'a HostMembers) -> Self {
        Self {
            layer: Layer::Root {
                locals: locals.into_iter().collect(),
                host,
            },
            parent: None,
        }
    }

    /// A new innermost layer over `self`.
    pub fn push<'b>(&'b self, layer: Layer<'b>) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            layer,
            parent: Some(self),
        }
    }

    pub const fn layer(&self) -> &Layer<'a> {
        &self.layer
    }

    /// Output form of `subject.name`. Names no layer claims are kept.
    pub fn resolve(&self, subject: &Subject<'_>) -> String {
        let mut current = Some(self);
        while let Some(scope) = current {
            if let Some(resolved) = scope.layer.resolve(subject) {
                return resolved;
            }
            current = scope.parent;
        }
        subject.name.to_string()
    }
}

impl Layer<'_> {
    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        let name = subject.name;
        match self {
            Self::Root { locals, host } => {
                if locals.contains(name) {
                    Some(name.to_string())
                } else if host.contains(name) {
                    Some(format!("{HOST_HANDLE}.{name}"))
                } else {
                    Some(name.to_string())
                }
            }
            Self::Locals(names) => names.contains(name).then(|| name.to_string()),
            Self::KeepThis => (name == "this").then(|| name.to_string()),
            Self::Class(class) => class.resolve(subject),
        }
    }
}

impl ClassLayer<'_> {
    fn resolve(&self, subject: &Subject<'_>) -> Option<String> {
        let name = subject.name;
        let self_id = &self.self_id;
        if name == "this" {
            return Some(if subject.call_sign || subject.member.is_none() {
                format!("{self_id}.$self")
            } else {
                self_id.clone()
            });
        }
        if let Some(&is_static) = self.members.fields.get(name) {
            return Some(if is_static {
                format!("{}.{name}", self.class_name)
            } else {
                format!("{self_id}.{name}")
            });
        }
        if self.members.inner_classes.contains(name) {
            return Some(format!("{self_id}.{name}"));
        }
        if let Some(&is_static) = self.members.methods.get(name) {
            return Some(if is_static {
                format!("{}.{name}", self.class_name)
            } else {
                format!("{self_id}.$self.{name}")
            });
        }
        None
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod tests;
