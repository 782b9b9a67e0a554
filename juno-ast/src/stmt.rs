//! Statement nodes.

use crate::decl::{DeclId, ScopeId};
use crate::expr::Expr;
use juno_util::Span;

/// A brace-delimited sequence of local declarations followed by statements.
/// Also serves as a function body (`FnDecl::body`, see `decl.rs`).
#[derive(Debug, Clone)]
pub struct StmtBlock {
    pub decls: Vec<DeclId>,
    pub stmts: Vec<Stmt>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub test: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Box<Stmt>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    /// `EmptyExpr` when the clause is omitted (`for (;;)`).
    pub init: Expr,
    pub test: Expr,
    pub step: Expr,
    pub body: Box<Stmt>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CaseClause {
    /// Absent for the `default` clause.
    pub label: Option<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub scrutinee: Expr,
    pub cases: Vec<CaseClause>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    /// `EmptyExpr` for a bare `return;`.
    pub value: Expr,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PrintStmt {
    pub args: Vec<Expr>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: Expr,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(StmtBlock),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Print(PrintStmt),
    Expr(ExprStmt),
}

impl Stmt {
    pub fn scope(&self) -> ScopeId {
        match self {
            Stmt::Block(s) => s.scope,
            Stmt::If(s) => s.scope,
            Stmt::While(s) => s.scope,
            Stmt::For(s) => s.scope,
            Stmt::Switch(s) => s.scope,
            Stmt::Return(s) => s.scope,
            Stmt::Break(s) => s.scope,
            Stmt::Print(s) => s.scope,
            Stmt::Expr(s) => s.scope,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Stmt::Block(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Break(s) => s.span,
            Stmt::Print(s) => s.span,
            Stmt::Expr(s) => s.span,
        }
    }

    /// Whether this statement introduces a scope that should be tagged as a
    /// loop (`while`/`for`, the targets `break` can escape).
    pub fn is_loop(&self) -> bool {
        matches!(self, Stmt::While(_) | Stmt::For(_))
    }
}
