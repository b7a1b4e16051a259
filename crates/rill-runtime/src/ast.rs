//! Abstract Syntax Tree (AST) definitions
//!
//! The node types a parser collaborator hands to the interpreter. The
//! interpreter executes a subset of these kinds; the rest exist so richer
//! trees can be handed over and rejected with a precise runtime error
//! instead of being unrepresentable.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// AST schema version
///
/// Included in JSON dumps so a producer and the interpreter can detect
/// drift. Increment on breaking changes to the node structure.
pub const AST_VERSION: u32 = 1;

/// Top-level program: a sequence of statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Versioned AST wrapper for JSON interchange
///
/// Parsers running out of process serialize through this wrapper; the CLI
/// deserializes it before execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedProgram {
    /// AST schema version
    pub ast_version: u32,
    /// The actual program AST
    #[serde(flatten)]
    pub program: Program,
}

impl VersionedProgram {
    /// Wrap a program with the current schema version
    pub fn new(program: Program) -> Self {
        Self {
            ast_version: AST_VERSION,
            program,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Program> for VersionedProgram {
    fn from(program: Program) -> Self {
        Self::new(program)
    }
}

/// An identifier with its source position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Assign(AssignStmt),
    Expr(ExprStmt),
    FunctionDef(FunctionDefStmt),
    For(ForStmt),
    If(IfStmt),
    While(WhileStmt),
    Return(ReturnStmt),
}

impl Stmt {
    /// Source position of this statement
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign(s) => s.span,
            Stmt::Expr(s) => s.span,
            Stmt::FunctionDef(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::Return(s) => s.span,
        }
    }

    /// Node kind name, used in "unsupported syntax" errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Assign(_) => "assignment",
            Stmt::Expr(_) => "expression statement",
            Stmt::FunctionDef(_) => "function definition",
            Stmt::For(_) => "for loop",
            Stmt::If(_) => "if statement",
            Stmt::While(_) => "while loop",
            Stmt::Return(_) => "return statement",
        }
    }
}

/// Assignment statement
///
/// The target is an arbitrary expression so malformed trees are
/// representable; only a plain name is executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    pub target: Expr,
    pub value: Expr,
    pub span: Span,
}

/// Bare expression statement (evaluated for effect, result discarded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// Function definition
///
/// The body is kept as raw statement nodes; it is executed, not re-parsed,
/// when the function is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefStmt {
    pub name: Identifier,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Iteration over a sequence: `for target in iterable: body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub target: Identifier,
    pub iterable: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Conditional (recognized, not executable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_body: Vec<Stmt>,
    pub else_body: Vec<Stmt>,
    pub span: Span,
}

/// While loop (recognized, not executable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Return statement (recognized, not executable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal, Span),
    Name(Identifier),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    List(ListExpr),
    Index(IndexExpr),
    Attribute(AttributeExpr),
}

impl Expr {
    /// Source position of this expression
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, span) => *span,
            Expr::Name(id) => id.span,
            Expr::Binary(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::List(e) => e.span,
            Expr::Index(e) => e.span,
            Expr::Attribute(e) => e.span,
        }
    }

    /// Node kind name, used in "unsupported syntax" errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Literal(..) => "literal",
            Expr::Name(_) => "name",
            Expr::Binary(_) => "binary operation",
            Expr::Unary(_) => "unary operation",
            Expr::Call(_) => "call",
            Expr::List(_) => "list literal",
            Expr::Index(_) => "index expression",
            Expr::Attribute(_) => "attribute access",
        }
    }
}

/// Literal constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i64),
    Str(String),
    None,
}

/// Binary operators
///
/// Only `Add`/`Sub`/`Mul`/`Div` dispatch to member methods; the rest are
/// recognized and rejected at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Gt,
}

impl BinaryOp {
    /// Surface syntax for error messages
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    /// Surface syntax for error messages
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

/// Binary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Unary expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

/// Call expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// List literal expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

/// Index expression (recognized, not executable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpr {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// Attribute access (recognized, not executable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeExpr {
    pub target: Box<Expr>,
    pub attr: Identifier,
    pub span: Span,
}
