//! Parser state - class, method and function declarations
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchc_common::diagnostic_codes;
use sketchc_scanner::AtomKind;
use tracing::trace;

use super::state::{ParserState, strip_delimiters};
use super::state_statements::{default_value_for_type, parse_params};
use crate::parser::ast::{
    ClassBody, ClassDecl, ClassField, ClassLikeBody, ClassMethod, Constructor, Expression,
    Function, GlobalMethod, InnerClass, InterfaceBody, Statement,
};
use crate::parser::registry::{ClassId, ClassKind, ClassMembers, DeclaredClass};
use crate::syntax::patterns::{
    ATTR_AND_TYPE_RE, CLASSES_RE, CONSTRUCTORS_RE, FIELD_TEST_RE, FUNCTIONS_RE, METHODS_RE,
    NOT_A_CONSTRUCTOR, NOT_A_FIELD_TYPE, NOT_A_METHOD_TYPE, find_accepted, replace_matches,
    starts_with_keyword,
};

static MEMBER_ATOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([DEGH])(\d+)""#).expect("valid regex"));

static LEADING_SEMICOLONS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\s*;)+").expect("valid regex"));

static FIELD_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r";(?:\s*;)*").expect("valid regex"));

static CONSTRUCTOR_PARTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""B(\d+)"\s*"A(\d+)""#).expect("valid regex"));

fn accept_method(caps: &Captures<'_>) -> bool {
    !starts_with_keyword(&caps[2], NOT_A_METHOD_TYPE)
}

/// Names listed after `extends` or `implements`.
fn clause_names(clause: Option<&str>, keyword: &str) -> Vec<String> {
    clause
        .map(str::trim)
        .and_then(|clause| clause.strip_prefix(keyword))
        .map(|names| {
            names
                .split(',')
                .map(|name| name.split_whitespace().collect::<String>())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Member atoms pulled out of a class or interface body.
#[derive(Default)]
struct MemberAtoms {
    methods: Vec<usize>,
    classes: Vec<usize>,
    constructors: Vec<usize>,
    functions: Vec<usize>,
}

impl ParserState<'_> {
    // =========================================================================
    // Declaration extraction
    // =========================================================================

    /// Replace class, method and function declarations in `text` with
    /// `"E#"`, `"D#"` and `"H#"` atoms, in that order.
    pub(crate) fn extract_classes_and_methods(&mut self, text: &str) -> String {
        let classes = CLASSES_RE
            .replace_all(text, |caps: &Captures<'_>| {
                self.atoms.push(&caps[0], AtomKind::Class)
            })
            .into_owned();
        let methods = replace_matches(&METHODS_RE, &classes, |caps| {
            accept_method(caps).then(|| self.atoms.push(&caps[0], AtomKind::Method))
        });
        FUNCTIONS_RE
            .replace_all(&methods, |caps: &Captures<'_>| {
                self.atoms.push(&caps[0], AtomKind::Function)
            })
            .into_owned()
    }

    /// Replace constructors of `class_name` with `"G#"` atoms.
    fn extract_constructors(&mut self, text: &str, class_name: &str) -> String {
        replace_matches(&CONSTRUCTORS_RE, text, |caps| {
            let name = &caps[2];
            (name == class_name && !starts_with_keyword(name, NOT_A_CONSTRUCTOR))
                .then(|| self.atoms.push(&caps[0], AtomKind::Constructor))
        })
    }

    /// Remove member atoms from a body, returning the remaining field text.
    fn take_member_atoms(text: &str, members: &mut MemberAtoms) -> String {
        MEMBER_ATOM_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let index = caps[2].parse().unwrap_or(0);
                match &caps[1] {
                    "D" => members.methods.push(index),
                    "E" => members.classes.push(index),
                    "H" => members.functions.push(index),
                    _ => members.constructors.push(index),
                }
                ""
            })
            .into_owned()
    }

    // =========================================================================
    // Top-level declarations
    // =========================================================================

    pub(crate) fn parse_global_method(&mut self, atom: &str) -> Statement {
        let Some(caps) = find_accepted(&METHODS_RE, atom, accept_method) else {
            self.report_malformed("method", atom);
            return Statement::Expression(Expression::plain(atom));
        };
        let name = caps[3].to_string();
        let params_atom = self.atom_for(&caps[4]);
        let body_atom = if &caps[6] == ";" {
            "{}".to_string()
        } else {
            self.atom_for(&caps[6])
        };
        trace!(name = %name, "global method");
        Statement::GlobalMethod(GlobalMethod {
            name,
            params: parse_params(&params_atom),
            body: self.parse_statements_block(&body_atom),
        })
    }

    pub(crate) fn parse_global_class(&mut self, atom: &str) -> Statement {
        match self.parse_class_declaration(atom) {
            Some((decl, _)) => Statement::Class(decl),
            None => {
                self.report_malformed("class", atom);
                Statement::Expression(Expression::plain(atom))
            }
        }
    }

    /// `function name(...) {...}` atom.
    pub(crate) fn parse_function(&mut self, atom: &str) -> Option<Function> {
        let caps = FUNCTIONS_RE.captures(atom)?;
        let name = caps.get(1).map(|m| m.as_str().to_string());
        let params_atom = self.atom_for(&caps[2]);
        let body_atom = self.atom_for(&caps[3]);
        Some(Function {
            name,
            params: parse_params(&params_atom),
            body: self.parse_statements_block(&body_atom),
        })
    }

    // =========================================================================
    // Classes and interfaces
    // =========================================================================

    /// Parse a class or interface atom and register it. Returns the
    /// declaration and whether it was declared `static`.
    fn parse_class_declaration(&mut self, atom: &str) -> Option<(ClassDecl, bool)> {
        let caps = CLASSES_RE.captures(atom)?;
        let is_static = caps[1].contains("static");
        let is_interface = &caps[2] == "interface";
        let name = caps[3].to_string();
        let kind = if is_interface {
            ClassKind::Interface
        } else {
            ClassKind::Class
        };

        let id = self
            .registry
                .declare(DeclaredClass::new(name.clone(), kind, self.current_class));
        let outer = self.current_class.replace(id);
        let body_atom = self.atom_for(&caps[6]);
        let extends = caps.get(4).map(|m| m.as_str());
        let body = if is_interface {
            let interface_names = clause_names(extends, "extends");
            ClassLikeBody::Interface(self.parse_interface_body(
                id,
                &body_atom,
                &name,
                interface_names,
            ))
        } else {
            let base_name = clause_names(extends, "extends").into_iter().next();
            let interface_names = clause_names(caps.get(5).map(|m| m.as_str()), "implements");
            ClassLikeBody::Class(self.parse_class_body(
                id,
                &body_atom,
                &name,
                base_name,
                interface_names,
            ))
        };
        self.current_class = outer;

        trace!(name = %name, id = id.0, interface = is_interface, "class declaration");
        Some((ClassDecl { id, name, body }, is_static))
    }

    fn parse_inner_class(&mut self, atom: &str) -> Option<InnerClass> {
        let parsed = self.parse_class_declaration(atom);
        if parsed.is_none() {
            self.report_malformed("class", atom);
        }
        parsed.map(|(decl, is_static)| InnerClass { is_static, decl })
    }

    /// Extract a class body and record its member summary in the registry.
    pub(crate) fn parse_class_body(
        &mut self,
        id: ClassId,
        atom: &str,
        name: &str,
        base_name: Option<String>,
        interface_names: Vec<String>,
    ) -> ClassBody {
        let declarations = self.extract_classes_and_methods(strip_delimiters(atom));
        let declarations = self.extract_constructors(&declarations, name);
        let mut member_atoms = MemberAtoms::default();
        let rest = Self::take_member_atoms(&declarations, &mut member_atoms);
        let (field_pieces, tail) = split_fields(&rest);

        let mut body = ClassBody {
            name: name.to_string(),
            base_name,
            interface_names,
            ..ClassBody::default()
        };
        for index in member_atoms.functions {
            let atom = self.atom_text(index);
            match self.parse_function(&atom) {
                Some(function) => body.functions.push(function),
                None => self.report_malformed("function", &atom),
            }
        }
        for index in member_atoms.methods {
            let atom = self.atom_text(index);
            if let Some(method) = self.parse_class_method(&atom) {
                body.methods.push(method);
            }
        }
        for piece in field_pieces {
            if let Some(field) = self.parse_class_field(&piece, name, false) {
                body.fields.push(field);
            }
        }
        let tail = tail.trim();
        if !tail.is_empty() {
            body.tail = Some(self.transform_expression(tail));
        }
        for index in member_atoms.constructors {
            let atom = self.atom_text(index);
            if let Some(constructor) = self.parse_constructor(&atom) {
                body.constructors.push(constructor);
            }
        }
        for index in member_atoms.classes {
            let atom = self.atom_text(index);
            if let Some(inner) = self.parse_inner_class(&atom) {
                body.inner_classes.push(inner);
            }
        }

        let mut members = ClassMembers::default();
        for field in &body.fields {
            for definition in &field.definitions {
                members.fields.insert(definition.name.clone(), field.is_static);
            }
        }
        for method in &body.methods {
            members.methods.insert(method.name.clone(), method.is_static);
        }
        for inner in &body.inner_classes {
            members.inner_classes.insert(inner.decl.name.clone());
        }
        if let Some(class) = self.registry.get_mut(id) {
            class.base_name = body.base_name.clone();
            class.interface_names = body.interface_names.clone();
            class.members = members;
        }
        body
    }

    /// Interface bodies keep only method names, constants and nested types.
    fn parse_interface_body(
        &mut self,
        id: ClassId,
        atom: &str,
        name: &str,
        interface_names: Vec<String>,
    ) -> InterfaceBody {
        let declarations = self.extract_classes_and_methods(strip_delimiters(atom));
        let mut member_atoms = MemberAtoms::default();
        let rest = Self::take_member_atoms(&declarations, &mut member_atoms);
        let (field_pieces, _tail) = split_fields(&rest);

        let mut body = InterfaceBody {
            name: name.to_string(),
            interface_names,
            ..InterfaceBody::default()
        };
        for index in member_atoms.methods {
            let atom = self.atom_text(index);
            match find_accepted(&METHODS_RE, &atom, accept_method) {
                Some(caps) => body.method_names.push(caps[3].to_string()),
                None => self.report_malformed("method", &atom),
            }
        }
        for piece in field_pieces {
            if let Some(field) = self.parse_class_field(&piece, name, true) {
                body.fields.push(field);
            }
        }
        for index in member_atoms.classes {
            let atom = self.atom_text(index);
            if let Some(inner) = self.parse_inner_class(&atom) {
                body.inner_classes.push(inner);
            }
        }

        let mut members = ClassMembers::default();
        for field in &body.fields {
            for definition in &field.definitions {
                members.fields.insert(definition.name.clone(), true);
            }
        }
        for method in &body.method_names {
            members.methods.insert(method.clone(), false);
        }
        for inner in &body.inner_classes {
            members.inner_classes.insert(inner.decl.name.clone());
        }
        if let Some(class) = self.registry.get_mut(id) {
            class.interface_names = body.interface_names.clone();
            class.members = members;
        }
        body
    }

    // =========================================================================
    // Class members
    // =========================================================================

    /// One `;`-separated piece of a class body. Interface constants are
    /// always static.
    fn parse_class_field(
        &mut self,
        piece: &str,
        class_name: &str,
        force_static: bool,
    ) -> Option<ClassField> {
        let text = piece.trim();
        if text.is_empty() {
            return None;
        }
        let is_declaration = FIELD_TEST_RE
            .captures(text)
            .is_some_and(|caps| !starts_with_keyword(&caps[2], NOT_A_FIELD_TYPE));
        let attr_and_type = ATTR_AND_TYPE_RE.captures(text).filter(|_| is_declaration);
        let Some(attr_and_type) = attr_and_type else {
            self.diagnostics.report(
                diagnostic_codes::UNRECOGNIZED_CLASS_MEMBER,
                &[text, class_name],
            );
            return None;
        };
        let is_static = force_static || attr_and_type[1].contains("static");
        let type_name = attr_and_type[2].to_string();
        let default = default_value_for_type(&type_name);
        let definitions = text[attr_and_type[0].len()..]
            .split(',')
            .map(|definition| self.parse_var_definition(definition, default))
            .collect();
        Some(ClassField {
            type_name,
            definitions,
            is_static,
        })
    }

    fn parse_class_method(&mut self, atom: &str) -> Option<ClassMethod> {
        let Some(caps) = find_accepted(&METHODS_RE, atom, accept_method) else {
            self.report_malformed("method", atom);
            return None;
        };
        let name = caps[3].to_string();
        let is_static = caps[1].contains("static");
        let params_atom = self.atom_for(&caps[4]);
        // Abstract methods have no body.
        let body_atom = if &caps[6] == ";" {
            "{}".to_string()
        } else {
            self.atom_for(&caps[6])
        };
        Some(ClassMethod {
            name,
            params: parse_params(&params_atom),
            body: self.parse_statements_block(&body_atom),
            is_static,
        })
    }

    fn parse_constructor(&mut self, atom: &str) -> Option<Constructor> {
        let Some(caps) = CONSTRUCTOR_PARTS_RE.captures(atom) else {
            self.report_malformed("constructor", atom);
            return None;
        };
        let params_atom = self.atom_text(caps[1].parse().unwrap_or(0));
        let body_atom = self.atom_text(caps[2].parse().unwrap_or(0));
        Some(Constructor {
            params: parse_params(&params_atom),
            body: self.parse_statements_block(&body_atom),
        })
    }

    fn report_malformed(&mut self, what: &str, text: &str) {
        self.diagnostics.report(
            diagnostic_codes::MALFORMED_DECLARATION,
            &[what, text.trim()],
        );
    }
}

/// Split the field text of a body on `;`. The piece after the last `;` is
/// the tail.
fn split_fields(text: &str) -> (Vec<String>, String) {
    let text = LEADING_SEMICOLONS_RE.replace(text, "");
    let mut pieces: Vec<String> = FIELD_SEPARATOR_RE
        .split(&text)
        .map(str::to_string)
        .collect();
    let tail = pieces.pop().unwrap_or_default();
    (pieces, tail)
}

#[cfg(test)]
#[path = "../../tests/state_declaration_tests.rs"]
mod tests;
