//! Passive AST data for the semantic-analysis pass: the type model,
//! declarations and scopes, and statement/expression nodes.
//!
//! Nothing in this crate performs name resolution or type checking — that's
//! `juno-sem`, which depends on this crate (never the other way around).

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod types;

pub use decl::{ClassDecl, Decl, DeclId, FnDecl, InterfaceDecl, Program, Scope, ScopeId, VarDecl};
pub use expr::Expr;
pub use stmt::{Stmt, StmtBlock};
pub use types::{NamedType, Primitive, Type};
