pub mod ast;
pub mod registry;
pub mod state;
pub mod state_statements;

mod pretransform;
mod state_declarations;
mod state_expressions;
