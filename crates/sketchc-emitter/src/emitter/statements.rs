//! Printer - statements, blocks and loop headers

use sketchc_common::HOST_HANDLE;
use sketchc_parser::ast::{ForHeader, Statement, StatementsBlock, Var};

use super::Printer;
use crate::scope::{Layer, Scope};

impl Printer<'_> {
    pub(crate) fn print_statements(
        &mut self,
        statements: &[Statement],
        scope: &Scope<'_>,
    ) -> String {
        statements
            .iter()
            .map(|statement| self.print_statement(statement, scope))
            .collect()
    }

    pub(crate) fn print_statement(&mut self, statement: &Statement, scope: &Scope<'_>) -> String {
        match statement {
            Statement::Text(text) => text.clone(),
            Statement::Expression(expression) => self.print_expression(expression, scope),
            Statement::Var(var) => self.print_var(var, scope),
            Statement::Prefix(stmt) => {
                let mut out = stmt.prefix.clone();
                if let Some(argument) = &stmt.argument {
                    out.push_str(&self.print_expression(argument, scope));
                }
                out
            }
            Statement::For(stmt) => {
                let header = self.print_for_header(&stmt.header, scope);
                format!("{}{header}", stmt.prefix)
            }
            Statement::Catch(stmt) => {
                let names: Vec<&str> = stmt.params.names().collect();
                format!("{}({})", stmt.prefix, names.join(", "))
            }
            Statement::SwitchCase(case) => {
                format!("case {}:", self.print_expression(&case.expression, scope))
            }
            Statement::Label(label) => label.text.clone(),
            Statement::Block(block) => self.print_block(block, scope),
            Statement::Class(decl) => self.print_global_class(decl, scope),
            Statement::GlobalMethod(method) => self.print_global_method(method, scope),
            Statement::Function(function) => self.print_function(function, scope),
        }
    }

    /// `{ ... }`. Adds a scope layer only when the block declares names.
    pub(crate) fn print_block(&mut self, block: &StatementsBlock, scope: &Scope<'_>) -> String {
        let names = block.local_names();
        let inner;
        let scope = if names.is_empty() {
            scope
        } else {
            inner = scope.push(Layer::locals(names));
            &inner
        };
        format!("{{\n{}\n}}", self.print_statements(&block.statements, scope))
    }

    fn print_var(&mut self, var: &Var, scope: &Scope<'_>) -> String {
        let definitions: Vec<String> = var
            .definitions
            .iter()
            .map(|definition| {
                let value = self.print_expression(&definition.value, scope);
                format!("{} = {value}", definition.name)
            })
            .collect();
        format!("var {}", definitions.join(","))
    }

    // =========================================================================
    // Loop headers
    // =========================================================================

    fn print_for_header(&mut self, header: &ForHeader, scope: &Scope<'_>) -> String {
        match header {
            ForHeader::For {
                init,
                condition,
                step,
            } => {
                let init = self.print_statement(init, scope);
                let condition = self.print_expression(condition, scope);
                let step = self.print_expression(step, scope);
                format!("({init}; {condition}; {step})")
            }
            ForHeader::ForIn { init, container } => {
                let init = match init.as_ref() {
                    Statement::Var(var) => {
                        format!("var {}", var.names().collect::<Vec<_>>().join(", "))
                    }
                    other => self.print_statement(other, scope),
                };
                let container = self.print_expression(container, scope);
                format!("({init} in {container})")
            }
            ForHeader::ForEach { init, container } => {
                // Numbered before the container, which may hold loops of its own.
                let iterator = self.next_iterator_id();
                let variable = match init.as_ref() {
                    Statement::Var(var) => var.names().next().unwrap_or_default().to_string(),
                    other => self.print_statement(other, scope).trim().to_string(),
                };
                let container = self.print_expression(container, scope);
                format!(
                    "(var {iterator} = new {HOST_HANDLE}.ObjectIterator({container}), {variable} = void(0); \
                     {iterator}.hasNext() && (({variable} = {iterator}.next()) || true);)"
                )
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/statement_emit_tests.rs"]
mod tests;
