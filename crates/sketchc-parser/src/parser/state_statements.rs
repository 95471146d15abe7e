//! Parser state - statement splitting
//!
//! Statements are found by scanning the flat text of one block for keyword
//! headers (`if"B3"`), bare keywords (`else`, `return`), declaration and
//! block atoms, `case x:`, labels and `;`. Everything between two boundaries
//! is a simple statement: either a typed declaration or an expression.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::state::{ParserState, strip_delimiters};
use crate::parser::ast::{
    CatchStatement, Expression, ForHeader, ForStatement, Label, Param, Params, PrefixStatement,
    Statement, StatementsBlock, SwitchCase, Var, VarDefinition,
};
use crate::syntax::patterns::{
    ATTR_AND_TYPE_RE, FIELD_TEST_RE, IDENT, NEXT_STATEMENT_RE, NOT_A_FIELD_TYPE,
    TrimmedSpaces, starts_with_keyword,
};

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bimport\s+[^;]+;").expect("valid regex"));

static CATCH_CHAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(catch\s*"B\d+"\s*"A\d+")(\s*catch\s*"B\d+"\s*"A\d+")+"#)
        .expect("valid regex")
});

static ARRAY_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s*"C\d+")+"#).expect("valid regex"));

static IN_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bin\b").expect("valid regex"));

static PARAM_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"\b({IDENT}\b)(\s*"[ABC]\d*")*\s*$"#)).expect("valid regex")
});

/// Value of a declared variable that has no initializer.
pub fn default_value_for_type(type_name: &str) -> &'static str {
    match type_name {
        "int" | "float" | "byte" | "short" | "long" | "double" => "0",
        "boolean" => "false",
        "color" => "0x00000000",
        _ => "null",
    }
}

/// Parameter names of a `(...)` atom. A trailing parameter written with
/// `...` becomes the rest parameter.
pub fn parse_params(atom: &str) -> Params {
    let inner = strip_delimiters(atom).trim();
    let mut params = Params::default();
    if inner.is_empty() {
        return params;
    }
    let pieces: Vec<&str> = inner.split(',').collect();
    for (i, piece) in pieces.iter().enumerate() {
        let name = PARAM_NAME_RE
            .captures(piece)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| piece.trim().to_string(), |m| m.as_str().to_string());
        let param = Param { name };
        if i == pieces.len() - 1 && piece.contains("...") {
            params.rest = Some(param);
            break;
        }
        params.params.push(param);
    }
    params
}

impl ParserState<'_> {
    // =========================================================================
    // Statement lists
    // =========================================================================

    /// Top level: declarations are pulled into atoms first and imports are
    /// dropped.
    pub(crate) fn parse_root_statements(&mut self, text: &str) -> Vec<Statement> {
        let extracted = self.extract_classes_and_methods(text);
        let without_imports = IMPORT_RE.replace_all(&extracted, "");
        self.parse_statements(&without_imports)
    }

    /// Split a flat statement list.
    pub(crate) fn parse_statements(&mut self, text: &str) -> Vec<Statement> {
        let text = CATCH_CHAIN_RE.replace_all(text, "$1").into_owned();
        let mut out = Vec::new();
        let mut last = 0;

        for caps in NEXT_STATEMENT_RE.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if let (Some(keyword), Some(index)) = (caps.get(1), caps.get(2)) {
                // The header atom starts two bytes before its digits: `"B`.
                let prefix = text[last..index.start() - 2].to_string();
                let atom = self.atom_text(index.as_str().parse().unwrap_or(0));
                let statement = match keyword.as_str() {
                    "for" => Statement::For(ForStatement {
                        prefix,
                        header: self.parse_for_header(&atom),
                    }),
                    "catch" => Statement::Catch(CatchStatement {
                        prefix,
                        params: parse_params(&atom),
                    }),
                    keyword => Statement::Prefix(PrefixStatement {
                        keyword: keyword.to_string(),
                        prefix,
                        argument: Some(self.transform_expression(&atom)),
                    }),
                };
                out.push(statement);
            } else if let Some(keyword) = caps.get(3) {
                out.push(Statement::Prefix(PrefixStatement {
                    keyword: keyword.as_str().to_string(),
                    prefix: text[last..whole.end()].to_string(),
                    argument: None,
                }));
            } else if let Some(token) = caps.get(4) {
                let space = &text[last..token.start()];
                if !space.trim().is_empty() {
                    // `new int[] {...}` and similar: part of the next statement.
                    continue;
                }
                out.push(Statement::Text(space.to_string()));
                let atom = self.atom_for(token.as_str());
                let statement = match token.as_str().as_bytes().get(1) {
                    Some(b'D') => self.parse_global_method(&atom),
                    Some(b'E') => self.parse_global_class(&atom),
                    Some(b'H') => match self.parse_function(&atom) {
                        Some(function) => Statement::Function(function),
                        None => Statement::Expression(Expression::plain(atom)),
                    },
                    _ => Statement::Block(self.parse_statements_block(&atom)),
                };
                out.push(statement);
            } else if let Some(expression) = caps.get(7) {
                out.push(Statement::SwitchCase(SwitchCase {
                    expression: self.transform_expression(expression.as_str().trim()),
                }));
            } else if let Some(label) = caps.get(8) {
                if !text[last..label.start()].trim().is_empty() {
                    // `a ? b : c`
                    continue;
                }
                out.push(Statement::Label(Label {
                    text: text[last..whole.end()].to_string(),
                }));
            } else {
                let statement = TrimmedSpaces::new(&text[last..whole.start()]);
                out.push(Statement::Text(statement.left.to_string()));
                if !statement.middle.is_empty() {
                    out.push(self.parse_statement(statement.middle));
                }
                out.push(Statement::Text(format!("{};", statement.right)));
            }
            last = whole.end();
        }

        let tail = TrimmedSpaces::new(&text[last..]);
        out.push(Statement::Text(tail.left.to_string()));
        if !tail.middle.is_empty() {
            out.push(self.parse_statement(tail.middle));
            out.push(Statement::Text(format!(";{}", tail.right)));
        }
        out.retain(|statement| !matches!(statement, Statement::Text(text) if text.is_empty()));
        out
    }

    /// `{ ... }` atom to a block.
    pub(crate) fn parse_statements_block(&mut self, atom: &str) -> StatementsBlock {
        let content = TrimmedSpaces::new(strip_delimiters(atom));
        StatementsBlock {
            statements: self.parse_statements(content.middle),
        }
    }

    // =========================================================================
    // Simple statements
    // =========================================================================

    /// A typed declaration becomes a `Var`, anything else an expression.
    pub(crate) fn parse_statement(&mut self, text: &str) -> Statement {
        let is_declaration = FIELD_TEST_RE
            .captures(text)
            .is_some_and(|caps| !starts_with_keyword(&caps[2], NOT_A_FIELD_TYPE));
        if !is_declaration {
            return Statement::Expression(self.transform_expression(text));
        }
        let Some(attr_and_type) = ATTR_AND_TYPE_RE.captures(text) else {
            return Statement::Expression(self.transform_expression(text));
        };
        let type_name = attr_and_type[2].to_string();
        let rest = &text[attr_and_type[0].len()..];
        let default = default_value_for_type(&type_name);
        let definitions = rest
            .split(',')
            .map(|definition| self.parse_var_definition(definition, default))
            .collect();
        trace!(type_name = %type_name, "variable declaration");
        Statement::Var(Var {
            type_name,
            definitions,
        })
    }

    pub(crate) fn parse_var_definition(
        &mut self,
        definition: &str,
        default: &str,
    ) -> VarDefinition {
        let (name, value, is_default) = match definition.find('=') {
            Some(eq) => (
                &definition[..eq],
                self.transform_expression(definition[eq + 1..].trim()),
                false,
            ),
            None => (definition, Expression::plain(default), true),
        };
        VarDefinition {
            name: ARRAY_SUFFIX_RE.replace_all(name, "").trim().to_string(),
            value,
            is_default,
        }
    }

    // =========================================================================
    // Loop headers
    // =========================================================================

    /// `(init; cond; step)`, `(x in obj)` or `(Type x : items)`.
    pub(crate) fn parse_for_header(&mut self, atom: &str) -> ForHeader {
        let inner = strip_delimiters(atom);
        if let Some(keyword) = IN_KEYWORD_RE.find(inner) {
            let init = self.parse_statement(inner[..keyword.start()].trim());
            return ForHeader::ForIn {
                init: Box::new(init),
                container: self.transform_expression(inner[keyword.end()..].trim()),
            };
        }
        if !inner.contains(';') {
            if let Some((declaration, container)) = inner.split_once(':') {
                let init = self.parse_statement(declaration.trim());
                return ForHeader::ForEach {
                    init: Box::new(init),
                    container: self.transform_expression(container.trim()),
                };
            }
        }
        let mut clauses = inner.splitn(3, ';');
        let init = clauses.next().unwrap_or_default().trim();
        let condition = clauses.next().unwrap_or_default().trim();
        let step = clauses.next().unwrap_or_default().trim();
        ForHeader::For {
            init: Box::new(self.parse_statement(init)),
            condition: self.transform_expression(condition),
            step: self.transform_expression(step),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/state_statement_tests.rs"]
mod tests;
