//! Printer - class factories
//!
//! A class renders as an immediately invoked factory returning its
//! constructor function:
//!
//! ```text
//! (function() {
//! function Name() {
//!   <instance wiring, methods, constructor dispatch>
//! }
//! <static members>
//! <metadata: $base, $interfaces, $isInterface, $methods>
//! return Name;
//! })()
//! ```
//!
//! Inside the constructor function the instance is aliased as `$this_N`,
//! N being the nesting level of the class, so nested class bodies can still
//! reach every enclosing instance.

use std::cmp::Reverse;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use sketchc_common::{HOST_HANDLE, diagnostic_codes};
use sketchc_parser::ClassId;
use sketchc_parser::ast::{
    ClassBody, ClassDecl, ClassLikeBody, ClassMethod, Constructor, GlobalMethod, InnerClass,
    InterfaceBody,
};
use tracing::trace;

use super::{Printer, params_list, with_rest_param};
use crate::scope::{ClassLayer, Layer, Scope, Subject};

/// A constructor body that already calls a base or sibling constructor.
static CONSTRUCTOR_CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(superCstr|constr)\b").expect("valid regex"));

/// Static definitions and metadata written after the constructor function.
#[derive(Default)]
struct FactoryTail {
    statics: String,
    metadata: String,
}

impl Printer<'_> {
    // =========================================================================
    // Top-level declarations
    // =========================================================================

    pub(crate) fn print_global_class(&mut self, decl: &ClassDecl, scope: &Scope<'_>) -> String {
        let name = &decl.name;
        let body = self.print_class_decl(decl, scope);
        format!("var {name} = {body};\n{HOST_HANDLE}.{name} = {name};\n")
    }

    /// A top-level method becomes a function published on the host and
    /// bound to it, so `this` inside it is the host object.
    pub(crate) fn print_global_method(
        &mut self,
        method: &GlobalMethod,
        scope: &Scope<'_>,
    ) -> String {
        let names = std::iter::once("this").chain(method.params.names());
        let inner = scope.push(Layer::locals(names));
        let body = self.print_block(&method.body, &inner);
        let body = with_rest_param(&method.params, body);
        let name = &method.name;
        format!(
            "function {name}{} {body}\n{HOST_HANDLE}.{name} = {name};\n{name} = {name}.bind({HOST_HANDLE});",
            params_list(&method.params)
        )
    }

    fn print_class_decl(&mut self, decl: &ClassDecl, scope: &Scope<'_>) -> String {
        match &decl.body {
            ClassLikeBody::Class(body) => self.print_class_body(decl.id, body, scope),
            ClassLikeBody::Interface(body) => self.print_interface_body(decl.id, body, scope),
        }
    }

    // =========================================================================
    // Class bodies
    // =========================================================================

    pub(crate) fn print_class_body(
        &mut self,
        id: ClassId,
        body: &ClassBody,
        scope: &Scope<'_>,
    ) -> String {
        let class_name = body.name.as_str();
        let self_id = format!("$this_{}", self.registry.scope_level(id));
        let linked_base = self.registry.get(id).and_then(|class| class.base);
        let inner = scope.push(Layer::Class(ClassLayer {
            self_id: self_id.clone(),
            class_name,
            members: self.registry.collect_members(id),
        }));

        let mut result = format!("var {self_id} = this;\n");
        let mut tail = FactoryTail::default();

        // Base names resolve outside the class itself.
        match &body.base_name {
            Some(base_name) => {
                let base = scope.resolve(&Subject::bare(base_name));
                result.push_str(&format!("var $super = {{ $upcast: {self_id} }};\n"));
                result.push_str(&format!(
                    "function $superCstr(){{{base}.apply($super,arguments);\
                     if(!('$self' in $super)) {HOST_HANDLE}.extendClassChain($super)}}\n"
                ));
                if linked_base.is_some() {
                    tail.statics.push_str(&format!(
                        "{HOST_HANDLE}.extendStaticMembers({class_name}, {base});\n"
                    ));
                }
                tail.metadata
                    .push_str(&format!("{class_name}.$base = {base};\n"));
            }
            None => result.push_str(&format!(
                "function $superCstr(){{{HOST_HANDLE}.extendClassChain({self_id})}}\n"
            )),
        }
        self.print_interface_links(id, class_name, &body.interface_names, scope, &mut tail);

        if !body.functions.is_empty() {
            let functions: Vec<String> = body
                .functions
                .iter()
                .map(|function| self.print_function(function, &inner))
                .collect();
            result.push_str(&functions.join("\n"));
            result.push('\n');
        }

        for inner_class in self.by_weight(&body.inner_classes) {
            let name = &inner_class.decl.name;
            let rendered = self.print_class_decl(&inner_class.decl, &inner);
            if inner_class.is_static {
                tail.statics
                    .push_str(&format!("{class_name}.{name} = {rendered};\n"));
                result.push_str(&format!("{self_id}.{name} = {class_name}.{name};\n"));
            } else {
                result.push_str(&format!("{self_id}.{name} = {rendered};\n"));
            }
        }

        for field in &body.fields {
            for definition in &field.definitions {
                let name = &definition.name;
                let value = self.print_expression(&definition.value, &inner);
                if field.is_static {
                    tail.statics
                        .push_str(&format!("{class_name}.{name} = {value};\n"));
                    result.push_str(&format!(
                        "{HOST_HANDLE}.defineProperty({self_id}, '{name}', \
                         {{get: function(){{return {class_name}.{name}}}, \
                         set: function(val){{{class_name}.{name} = val}}}});\n"
                    ));
                } else {
                    result.push_str(&format!("{self_id}.{name} = {value};\n"));
                }
            }
        }

        self.print_methods(class_name, &self_id, &body.methods, &inner, &mut result, &mut tail);

        if let Some(expression) = &body.tail {
            result.push_str(&self.print_expression(expression, &inner));
        }

        self.print_constructors(&self_id, &body.constructors, &inner, &mut result);

        trace!(class = class_name, self_id = %self_id, "rendered class body");
        format!(
            "(function() {{\nfunction {class_name}() {{\n{result}}}\n{}{}return {class_name};\n}})()",
            tail.statics, tail.metadata
        )
    }

    /// Interfaces have no instances: the constructor throws, and only
    /// constants, nested types and metadata are emitted.
    pub(crate) fn print_interface_body(
        &mut self,
        id: ClassId,
        body: &InterfaceBody,
        scope: &Scope<'_>,
    ) -> String {
        let class_name = body.name.as_str();
        let mut tail = FactoryTail::default();

        self.print_interface_links(id, class_name, &body.interface_names, scope, &mut tail);
        tail.metadata
            .push_str(&format!("{class_name}.$isInterface = true;\n"));
        let methods = if body.method_names.is_empty() {
            "[]".to_string()
        } else {
            format!("['{}']", body.method_names.join("', '"))
        };
        tail.metadata
            .push_str(&format!("{class_name}.$methods = {methods};\n"));

        // Types nested in an interface are implicitly static.
        for inner_class in self.by_weight(&body.inner_classes) {
            let name = &inner_class.decl.name;
            let rendered = self.print_class_decl(&inner_class.decl, scope);
            tail.statics
                .push_str(&format!("{class_name}.{name} = {rendered};\n"));
        }
        for field in &body.fields {
            for definition in &field.definitions {
                let value = self.print_expression(&definition.value, scope);
                tail.statics
                    .push_str(&format!("{class_name}.{} = {value};\n", definition.name));
            }
        }

        trace!(interface = class_name, "rendered interface body");
        format!(
            "(function() {{\nfunction {class_name}() {{ throw 'Unable to create \"{class_name}\" interface'; }}\n\
             {}{}return {class_name};\n}})()",
            tail.statics, tail.metadata
        )
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Copy-down calls and `$interfaces` for the interfaces that resolved
    /// to declarations of this unit. Others are left to the runtime.
    fn print_interface_links(
        &self,
        id: ClassId,
        class_name: &str,
        interface_names: &[String],
        scope: &Scope<'_>,
        tail: &mut FactoryTail,
    ) {
        if interface_names.is_empty() {
            return;
        }
        let linked = self
            .registry
            .get(id)
            .map(|class| class.interfaces.as_slice())
            .unwrap_or_default();
        let resolved: Vec<String> = interface_names
            .iter()
            .zip(linked)
            .filter(|(_, link)| link.is_some())
            .map(|(name, _)| scope.resolve(&Subject::bare(name)))
            .collect();
        for interface in &resolved {
            tail.statics.push_str(&format!(
                "{HOST_HANDLE}.extendInterfaceMembers({class_name}, {interface});\n"
            ));
        }
        tail.metadata.push_str(&format!(
            "{class_name}.$interfaces = [{}];\n",
            resolved.join(", ")
        ));
    }

    /// Methods are registered under `name$arity`; later overloads of the
    /// same name get a `_k` suffix. Registration dispatches on argument
    /// count only, so overloads sharing an arity are reported.
    fn print_methods(
        &mut self,
        class_name: &str,
        self_id: &str,
        methods: &[ClassMethod],
        scope: &Scope<'_>,
        result: &mut String,
        tail: &mut FactoryTail,
    ) {
        let mut overloads: FxHashMap<&str, Vec<(usize, bool)>> = FxHashMap::default();
        for method in methods {
            let name = method.name.as_str();
            let arity = method.params.len();
            let has_rest = method.params.has_rest();
            let seen = overloads.entry(name).or_default();
            if seen.contains(&(arity, has_rest)) {
                self.diagnostics.report(
                    diagnostic_codes::AMBIGUOUS_OVERLOAD,
                    &[name, class_name, &arity.to_string()],
                );
            }
            seen.push((arity, has_rest));
            let method_id = if seen.len() > 1 {
                format!("{name}${arity}_{}", seen.len())
            } else {
                format!("{name}${arity}")
            };

            let function = self.print_class_method(method, &method_id, scope);
            let register = |target: &str| {
                format!("{HOST_HANDLE}.addMethod({target}, '{name}', {method_id}, {has_rest});\n")
            };
            if method.is_static {
                tail.statics.push_str(&function);
                tail.statics.push_str(&register(class_name));
            } else {
                result.push_str(&function);
            }
            result.push_str(&register(self_id));
        }
    }

    fn print_class_method(
        &mut self,
        method: &ClassMethod,
        method_id: &str,
        scope: &Scope<'_>,
    ) -> String {
        let inner = scope.push(Layer::locals(method.params.names()));
        let body = self.print_block(&method.body, &inner);
        let body = with_rest_param(&method.params, body);
        format!("function {method_id}{} {body}\n", params_list(&method.params))
    }

    /// Overloaded constructors `$constr_N` and the `$constr` dispatcher
    /// choosing one by argument count. Without a match the base class
    /// constructor runs.
    fn print_constructors(
        &mut self,
        self_id: &str,
        constructors: &[Constructor],
        scope: &Scope<'_>,
        result: &mut String,
    ) {
        if !constructors.is_empty() {
            let rendered: Vec<String> = constructors
                .iter()
                .map(|constructor| self.print_constructor(constructor, scope))
                .collect();
            result.push_str(&rendered.join("\n"));
            result.push('\n');
        }

        result.push_str("function $constr() {\n");
        let clauses: Vec<String> = constructors
            .iter()
            .map(|constructor| {
                let arity = constructor.params.len();
                let comparison = if constructor.params.has_rest() {
                    ">="
                } else {
                    "==="
                };
                format!(
                    "if(arguments.length {comparison} {arity}) {{ $constr_{arity}.apply({self_id}, arguments); }}"
                )
            })
            .collect();
        if !clauses.is_empty() {
            result.push_str(&clauses.join(" else "));
            result.push_str(" else ");
        }
        result.push_str("$superCstr();\n}\n$constr.apply(null, arguments);\n");
    }

    fn print_constructor(&mut self, constructor: &Constructor, scope: &Scope<'_>) -> String {
        let inner = scope.push(Layer::locals(constructor.params.names()));
        let body = self.print_block(&constructor.body, &inner);
        let mut body = with_rest_param(&constructor.params, body);
        if !CONSTRUCTOR_CALL_RE.is_match(&body) {
            body = format!(
                "{{\n$superCstr();\n{}",
                body.strip_prefix('{').unwrap_or(&body)
            );
        }
        format!(
            "function $constr_{}{}{body}\n",
            constructor.params.len(),
            params_list(&constructor.params)
        )
    }

    /// Nested declarations, heaviest first.
    fn by_weight<'b>(&self, classes: &'b [InnerClass]) -> Vec<&'b InnerClass> {
        let mut sorted: Vec<&InnerClass> = classes.iter().collect();
        sorted.sort_by_key(|class| Reverse(self.registry.weight(class.decl.id)));
        sorted
    }
}

#[cfg(test)]
#[path = "../../tests/class_emit_tests.rs"]
mod tests;
