//! Script AST for generated client-side code
//!
//! Script units are assembled from the constructor functions below and
//! turned into text by the renderer crate. Nothing in the embedding path
//! inspects a unit beyond rendering it.

use serde::{Deserialize, Serialize};

use crate::{AttrName, CoreError};

/// A variable name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ident {
    /// Rendered verbatim
    Named(String),
    /// Hygienic local, renamed at render time using the render label so
    /// that separately embedded blocks never share a name
    Fresh(u32),
}

impl Ident {
    pub fn named(name: impl Into<String>) -> Self {
        Ident::Named(name.into())
    }

    pub fn fresh(index: u32) -> Self {
        Ident::Fresh(index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    TypeOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::StrictEq => "===",
            BinOp::StrictNotEq => "!==",
            BinOp::Lt => "<",
            BinOp::LtEq => "<=",
            BinOp::Gt => ">",
            BinOp::GtEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Var(Ident),
    Lit(Literal),
    /// Arbitrary JSON data, rendered as a JavaScript literal
    Json(serde_json::Value),
    Array(Vec<Expr>),
    Object(Vec<(String, Expr)>),
    Member(Box<Expr>, String),
    Index(Box<Expr>, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    New(Box<Expr>, Vec<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Cond(Box<Expr>, Box<Expr>, Box<Expr>),
    Assign(Box<Expr>, Box<Expr>),
    Func(Vec<Ident>, Vec<Stmt>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(Ident::named(name))
    }

    pub fn fresh(index: u32) -> Self {
        Expr::Var(Ident::fresh(index))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Expr::Lit(Literal::Str(value.into()))
    }

    pub fn int(value: i64) -> Self {
        Expr::Lit(Literal::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Lit(Literal::Bool(value))
    }

    pub fn null() -> Self {
        Expr::Lit(Literal::Null)
    }

    pub fn func(params: Vec<Ident>, body: Vec<Stmt>) -> Self {
        Expr::Func(params, body)
    }

    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(op, Box::new(operand))
    }

    pub fn cond(test: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Cond(Box::new(test), Box::new(then), Box::new(otherwise))
    }

    pub fn member(self, property: impl Into<String>) -> Self {
        Expr::Member(Box::new(self), property.into())
    }

    pub fn index(self, index: Expr) -> Self {
        Expr::Index(Box::new(self), Box::new(index))
    }

    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call(Box::new(self), args)
    }

    pub fn assign(self, value: Expr) -> Self {
        Expr::Assign(Box::new(self), Box::new(value))
    }

    /// Immediately invoked function with no parameters
    pub fn iife(body: Vec<Stmt>) -> Self {
        Expr::func(Vec::new(), body).call(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Var(Ident, Option<Expr>),
    Expr(Expr),
    Return(Option<Expr>),
    If(Expr, Vec<Stmt>, Vec<Stmt>),
    While(Expr, Vec<Stmt>),
    Block(Vec<Stmt>),
}

impl Stmt {
    pub fn var(ident: Ident, init: Option<Expr>) -> Self {
        Stmt::Var(ident, init)
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(expr)
    }

    pub fn ret(expr: Expr) -> Self {
        Stmt::Return(Some(expr))
    }
}

/// A unit of generated script: either a statement or an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptUnit {
    Stmt(Stmt),
    Expr(Expr),
}

impl ScriptUnit {
    pub fn block(stmts: Vec<Stmt>) -> Self {
        ScriptUnit::Stmt(Stmt::Block(stmts))
    }
}

impl From<Stmt> for ScriptUnit {
    fn from(stmt: Stmt) -> Self {
        ScriptUnit::Stmt(stmt)
    }
}

impl From<Expr> for ScriptUnit {
    fn from(expr: Expr) -> Self {
        ScriptUnit::Expr(expr)
    }
}

impl From<Vec<Stmt>> for ScriptUnit {
    fn from(stmts: Vec<Stmt>) -> Self {
        ScriptUnit::block(stmts)
    }
}

/// A script unit destined for an attribute value, e.g. `onclick := ...`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScript {
    pub name: AttrName,
    pub script: ScriptUnit,
}

impl NamedScript {
    pub fn new(name: &str, script: impl Into<ScriptUnit>) -> Result<Self, CoreError> {
        Ok(Self {
            name: AttrName::new(name)?,
            script: script.into(),
        })
    }
}
