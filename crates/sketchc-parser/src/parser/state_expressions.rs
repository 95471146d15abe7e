//! Parser state - expressions
//!
//! An expression is pre-transformed one atom at a time while its `A/B/C`
//! atoms are expanded back into text. Nested declarations (function
//! literals, anonymous classes, object literals) are not expanded; they are
//! parsed into `Transform`s and referenced from the text as `"!N"`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchc_common::diagnostic_codes;
use sketchc_scanner::AtomKind;
use sketchc_scanner::placeholder::transform_placeholder;

use super::state::{ParserState, strip_delimiters};
use crate::parser::ast::{
    Expression, InlineClass, InlineObject, ObjectMember, Transform,
};
use crate::parser::registry::{ClassKind, DeclaredClass};
use crate::syntax::patterns::{IDENT, TrimmedSpaces};

static BRACKET_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[ABC](\d+)""#).expect("valid regex"));

static OBJECT_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^\{{\s*(?:{IDENT}|'\d+')\s*:"#)).expect("valid regex")
});

static FUNCTION_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""H(\d+)""#).expect("valid regex"));

static INLINE_CLASS_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""F(\d+)""#).expect("valid regex"));

static INLINE_OBJECT_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""I(\d+)""#).expect("valid regex"));

static INLINE_CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\bnew\s*((?:{IDENT}\s*\.\s*)*{IDENT})\s*"B\d+"\s*"A(\d+)""#
    ))
    .expect("valid regex")
});

impl ParserState<'_> {
    /// Pre-transform and expand `text`, then pull nested declarations out
    /// into transforms.
    pub(crate) fn transform_expression(&mut self, text: &str) -> Expression {
        let expanded = self.expand_expression(text);
        let mut transforms = Vec::new();

        let text = FUNCTION_ATOM_RE
            .replace_all(&expanded, |caps: &Captures<'_>| {
                let atom = self.atom_text(caps[1].parse().unwrap_or(0));
                match self.parse_function(&atom) {
                    Some(function) => {
                        transforms.push(Transform::Function(function));
                        transform_placeholder(transforms.len() - 1)
                    }
                    None => atom,
                }
            })
            .into_owned();
        let text = INLINE_CLASS_ATOM_RE
            .replace_all(&text, |caps: &Captures<'_>| {
                let atom = self.atom_text(caps[1].parse().unwrap_or(0));
                match self.parse_inline_class(&atom) {
                    Some(class) => {
                        transforms.push(Transform::InlineClass(class));
                        transform_placeholder(transforms.len() - 1)
                    }
                    None => atom,
                }
            })
            .into_owned();
        let text = INLINE_OBJECT_ATOM_RE
            .replace_all(&text, |caps: &Captures<'_>| {
                let atom = self.atom_text(caps[1].parse().unwrap_or(0));
                transforms.push(Transform::InlineObject(self.parse_inline_object(&atom)));
                transform_placeholder(transforms.len() - 1)
            })
            .into_owned();

        Expression { text, transforms }
    }

    /// Recursively expand bracket atoms, pre-transforming each flat level.
    /// A `{...}` atom is an array initializer unless it starts like an
    /// object literal (`{ key: ...`).
    pub(crate) fn expand_expression(&mut self, text: &str) -> String {
        match text.as_bytes().first() {
            Some(&(open @ (b'(' | b'['))) if text.len() >= 2 => {
                let close = text.as_bytes()[text.len() - 1];
                let inner = self.expand_expression(strip_delimiters(text));
                format!("{}{inner}{}", open as char, close as char)
            }
            Some(b'{') if text.len() >= 2 => {
                let inner = strip_delimiters(text);
                if OBJECT_LITERAL_RE.is_match(text) {
                    format!("{{{}}}", self.push_atom(inner, AtomKind::InlineObject))
                } else {
                    format!("[{}]", self.expand_expression(inner))
                }
            }
            _ => {
                let trimmed = TrimmedSpaces::new(text);
                let rewritten = self.pre_transform(trimmed.middle);
                let expanded = BRACKET_ATOM_RE
                    .replace_all(&rewritten, |caps: &Captures<'_>| {
                        let index: usize = caps[1].parse().unwrap_or(0);
                        if self.atoms.get(index).is_none() || index == 0 {
                            self.diagnostics.report(
                                diagnostic_codes::DANGLING_REFERENCE,
                                &[&caps[0]],
                            );
                            return caps[0].to_string();
                        }
                        let atom = self.atom_text(index);
                        self.expand_expression(&atom)
                    })
                    .into_owned();
                trimmed.untrim(&expanded)
            }
        }
    }

    /// `label: value, ...` from the inside of an object literal.
    fn parse_inline_object(&mut self, text: &str) -> InlineObject {
        let members = text
            .split(',')
            .map(|member| match member.find(':') {
                Some(colon) => ObjectMember {
                    label: Some(member[..colon].trim().to_string()),
                    value: self.transform_expression(member[colon + 1..].trim()),
                },
                None => ObjectMember {
                    label: None,
                    value: self.transform_expression(member),
                },
            })
            .collect();
        InlineObject { members }
    }

    /// `new Type(...) { ... }` becomes an anonymous class named
    /// `Type$classN` that implements `Type`.
    fn parse_inline_class(&mut self, atom: &str) -> Option<InlineClass> {
        let Some(caps) = INLINE_CLASS_RE.captures(atom) else {
            self.diagnostics.report(
                diagnostic_codes::MALFORMED_DECLARATION,
                &["anonymous class", atom.trim()],
            );
            return None;
        };
        let type_name: String = caps[1].split_whitespace().collect();
        let id = self.registry.declare(DeclaredClass::new(
            type_name.clone(),
            ClassKind::Inline,
            self.current_class,
        ));
        let name = format!("{type_name}$class{}", id.0 + 1);
        if let Some(class) = self.registry.get_mut(id) {
            class.name = name.clone();
        }

        let outer = self.current_class.replace(id);
        let body_atom = self.atom_text(caps[2].parse().unwrap_or(0));
        let body = self.parse_class_body(id, &body_atom, &name, None, vec![type_name]);
        self.current_class = outer;

        Some(InlineClass { id, name, body })
    }
}

#[cfg(test)]
#[path = "../../tests/expression_tests.rs"]
mod tests;
