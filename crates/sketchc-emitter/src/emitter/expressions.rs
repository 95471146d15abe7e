//! Printer - expressions and the declarations nested in them
//!
//! Expression text is already in the output dialect. Rendering only
//! qualifies identifiers through the scope chain and replaces `"!N"`
//! references with the rendered function literal, anonymous class or
//! object literal they stand for.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchc_common::diagnostic_codes;
use sketchc_parser::ast::{Expression, Function, InlineObject, Transform};

use super::{Printer, params_list, with_rest_param};
use crate::scope::{Layer, Scope, Subject};

/// An identifier with an optional member access (and call) after it. A
/// match with a leading `.` is itself a member access and is left alone.
static IDENTIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\.\s*)?((?:\b[A-Za-z_]|\$)[\w$]*)(\s*\.\s*([A-Za-z_$][\w$]*)(\s*\()?)?")
        .expect("valid regex")
});

static TRANSFORM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""!(\d+)""#).expect("valid regex"));

/// Qualify every identifier of `text` that a scope layer claims.
pub(crate) fn resolve_identifiers(text: &str, scope: &Scope<'_>) -> String {
    IDENTIFIER_RE
        .replace_all(text, |caps: &Captures<'_>| {
            if caps.get(1).is_some() {
                return caps[0].to_string();
            }
            let subject = Subject {
                name: &caps[2],
                member: caps.get(4).map(|m| m.as_str()),
                call_sign: caps.get(5).is_some(),
            };
            let suffix = caps.get(3).map_or("", |m| m.as_str());
            format!("{}{suffix}", scope.resolve(&subject))
        })
        .into_owned()
}

impl Printer<'_> {
    pub(crate) fn print_expression(
        &mut self,
        expression: &Expression,
        scope: &Scope<'_>,
    ) -> String {
        let resolved = resolve_identifiers(&expression.text, scope);
        if expression.transforms.is_empty() && !resolved.contains("\"!") {
            return resolved;
        }
        TRANSFORM_RE
            .replace_all(&resolved, |caps: &Captures<'_>| {
                let transform = caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| expression.transforms.get(index));
                match transform {
                    Some(transform) => self.print_transform(transform, scope),
                    None => {
                        self.diagnostics
                            .report(diagnostic_codes::DANGLING_REFERENCE, &[&caps[0]]);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }

    fn print_transform(&mut self, transform: &Transform, scope: &Scope<'_>) -> String {
        match transform {
            Transform::Function(function) => self.print_function(function, scope),
            Transform::InlineClass(class) => {
                format!("new ({})", self.print_class_body(class.id, &class.body, scope))
            }
            Transform::InlineObject(object) => self.print_inline_object(object, scope),
        }
    }

    /// `function name(a, b) {...}`, the name being optional. The literal
    /// keeps its own `this`.
    pub(crate) fn print_function(&mut self, function: &Function, scope: &Scope<'_>) -> String {
        let names = std::iter::once("this").chain(function.params.names());
        let inner = scope.push(Layer::locals(names));
        let body = self.print_block(&function.body, &inner);
        let body = with_rest_param(&function.params, body);
        let name = function
            .name
            .as_deref()
            .map(|name| format!(" {name}"))
            .unwrap_or_default();
        format!("function{name}{} {body}", params_list(&function.params))
    }

    /// Members of an object literal; the braces stay in the expression text.
    fn print_inline_object(&mut self, object: &InlineObject, scope: &Scope<'_>) -> String {
        let inner = scope.push(Layer::KeepThis);
        let members: Vec<String> = object
            .members
            .iter()
            .map(|member| {
                let value = self.print_expression(&member.value, &inner);
                match &member.label {
                    Some(label) => format!("{label}: {value}"),
                    None => value,
                }
            })
            .collect();
        members.join(", ")
    }
}

#[cfg(test)]
#[path = "../../tests/expression_emit_tests.rs"]
mod tests;
