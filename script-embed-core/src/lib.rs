//! Core models for script embedding
//!
//! This crate contains the shared data structures used across the
//! workspace: the markup tree that templates produce, the script AST
//! that generated client code is built from, and the embedding
//! configuration.

pub mod config;
pub mod error;
pub mod markup;
pub mod script;

pub use config::EmbedConfig;
pub use error::CoreError;
pub use markup::{AttrName, Attribute, Element, Node, TagName};
pub use script::{BinOp, Expr, Ident, Literal, NamedScript, ScriptUnit, Stmt, UnaryOp};
