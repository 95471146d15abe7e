//! Node model produced by the extractor.
//!
//! Every node owns its children. Class-like declarations do not point at
//! their base classes or enclosing class; they carry a `ClassId` into the
//! `ClassRegistry`, which the binder links after the whole tree exists.
//!
//! Text held by nodes is still masked: literals are `'N'` placeholders and
//! `$` is encoded. Rendering happens in the emitter.

use crate::parser::registry::ClassId;

// =============================================================================
// Root and statements
// =============================================================================

/// The whole compilation unit.
#[derive(Clone, Debug, Default)]
pub struct Root {
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug)]
pub enum Statement {
    /// Whitespace and punctuation between statements, emitted verbatim.
    Text(String),
    /// An expression statement (no trailing `;`, which is a separate `Text`).
    Expression(Expression),
    Var(Var),
    Prefix(PrefixStatement),
    For(ForStatement),
    Catch(CatchStatement),
    SwitchCase(SwitchCase),
    Label(Label),
    Block(StatementsBlock),
    /// A top-level class or interface.
    Class(ClassDecl),
    GlobalMethod(GlobalMethod),
    Function(Function),
}

impl Statement {
    /// Names this statement declares in its enclosing block.
    pub fn declared_names(&self) -> Vec<&str> {
        match self {
            Self::Var(var) => var.names().collect(),
            Self::For(stmt) => match stmt.header.init() {
                Some(Statement::Var(var)) => var.names().collect(),
                _ => Vec::new(),
            },
            Self::Class(decl) => vec![decl.name.as_str()],
            Self::GlobalMethod(method) => vec![method.name.as_str()],
            Self::Function(func) => func.name.as_deref().into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// `{ ... }` with its own statement list.
#[derive(Clone, Debug, Default)]
pub struct StatementsBlock {
    pub statements: Vec<Statement>,
}

impl StatementsBlock {
    /// Names declared directly in this block. Empty means the block does not
    /// need its own scope layer.
    pub fn local_names(&self) -> Vec<&str> {
        local_names(&self.statements)
    }
}

pub fn local_names(statements: &[Statement]) -> Vec<&str> {
    statements.iter().flat_map(Statement::declared_names).collect()
}

/// `if`, `while`, `switch`, `with`, `return`, `else`, ... The prefix holds
/// the keyword together with the whitespace in front of it.
#[derive(Clone, Debug)]
pub struct PrefixStatement {
    pub keyword: String,
    pub prefix: String,
    pub argument: Option<Expression>,
}

#[derive(Clone, Debug)]
pub struct ForStatement {
    pub prefix: String,
    pub header: ForHeader,
}

#[derive(Clone, Debug)]
pub enum ForHeader {
    /// `(init; condition; step)`
    For {
        init: Box<Statement>,
        condition: Expression,
        step: Expression,
    },
    /// `(init in container)`
    ForIn {
        init: Box<Statement>,
        container: Expression,
    },
    /// `(Type name : container)`, desugared to an iterator loop.
    ForEach {
        init: Box<Statement>,
        container: Expression,
    },
}

impl ForHeader {
    pub fn init(&self) -> Option<&Statement> {
        match self {
            Self::For { init, .. } | Self::ForIn { init, .. } | Self::ForEach { init, .. } => {
                Some(init)
            }
        }
    }
}

/// A `catch (...)` clause; later clauses of the same `try` are dropped.
#[derive(Clone, Debug)]
pub struct CatchStatement {
    pub prefix: String,
    pub params: Params,
}

#[derive(Clone, Debug)]
pub struct SwitchCase {
    pub expression: Expression,
}

/// `name:` including the whitespace in front of it.
#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
}

// =============================================================================
// Variables
// =============================================================================

/// A typed declaration statement, rendered as `var a = .., b = ..`.
#[derive(Clone, Debug)]
pub struct Var {
    pub type_name: String,
    pub definitions: Vec<VarDefinition>,
}

impl Var {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|def| def.name.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct VarDefinition {
    pub name: String,
    pub value: Expression,
    /// True when no initializer was written and `value` is the type default.
    pub is_default: bool,
}

// =============================================================================
// Functions and methods
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    pub params: Vec<Param>,
    /// Trailing `Type... name` parameter.
    pub rest: Option<Param>,
}

impl Params {
    /// Number of fixed parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.rest.is_none()
    }

    pub fn has_rest(&self) -> bool {
        self.rest.is_some()
    }

    /// Every parameter name, the rest parameter included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .chain(self.rest.as_ref())
            .map(|param| param.name.as_str())
    }
}

/// A `function name(...) {...}` literal or declaration.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: Option<String>,
    pub params: Params,
    pub body: StatementsBlock,
}

/// A method declared at the top level, bound to the host object.
#[derive(Clone, Debug)]
pub struct GlobalMethod {
    pub name: String,
    pub params: Params,
    pub body: StatementsBlock,
}

#[derive(Clone, Debug)]
pub struct ClassMethod {
    pub name: String,
    pub params: Params,
    pub body: StatementsBlock,
    pub is_static: bool,
}

#[derive(Clone, Debug)]
pub struct Constructor {
    pub params: Params,
    pub body: StatementsBlock,
}

#[derive(Clone, Debug)]
pub struct ClassField {
    pub type_name: String,
    pub definitions: Vec<VarDefinition>,
    pub is_static: bool,
}

// =============================================================================
// Classes
// =============================================================================

/// A named class or interface, global or nested.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub id: ClassId,
    pub name: String,
    pub body: ClassLikeBody,
}

impl ClassDecl {
    pub const fn is_interface(&self) -> bool {
        matches!(self.body, ClassLikeBody::Interface(_))
    }
}

#[derive(Clone, Debug)]
pub enum ClassLikeBody {
    Class(ClassBody),
    Interface(InterfaceBody),
}

/// A class or interface declared inside another class body.
#[derive(Clone, Debug)]
pub struct InnerClass {
    pub is_static: bool,
    pub decl: ClassDecl,
}

/// `new Type(...) { ... }`: an anonymous class implementing `Type`.
#[derive(Clone, Debug)]
pub struct InlineClass {
    pub id: ClassId,
    pub name: String,
    pub body: ClassBody,
}

#[derive(Clone, Debug, Default)]
pub struct ClassBody {
    pub name: String,
    pub base_name: Option<String>,
    pub interface_names: Vec<String>,
    pub functions: Vec<Function>,
    pub methods: Vec<ClassMethod>,
    pub fields: Vec<ClassField>,
    pub constructors: Vec<Constructor>,
    pub inner_classes: Vec<InnerClass>,
    /// Text after the last `;` of the body.
    pub tail: Option<Expression>,
}

#[derive(Clone, Debug, Default)]
pub struct InterfaceBody {
    pub name: String,
    pub interface_names: Vec<String>,
    pub method_names: Vec<String>,
    pub fields: Vec<ClassField>,
    pub inner_classes: Vec<InnerClass>,
}

// =============================================================================
// Expressions
// =============================================================================

/// Pre-transformed expression text. Nested declarations found inside it are
/// kept in `transforms` and referenced from the text as `"!N"`.
#[derive(Clone, Debug, Default)]
pub struct Expression {
    pub text: String,
    pub transforms: Vec<Transform>,
}

impl Expression {
    /// An expression with no nested declarations.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            transforms: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Transform {
    Function(Function),
    InlineClass(InlineClass),
    InlineObject(InlineObject),
}

/// `{ label: value, ... }`
#[derive(Clone, Debug, Default)]
pub struct InlineObject {
    pub members: Vec<ObjectMember>,
}

#[derive(Clone, Debug)]
pub struct ObjectMember {
    pub label: Option<String>,
    pub value: Expression,
}
