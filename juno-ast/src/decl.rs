//! Declarations, scopes, and the `Program` container.
//!
//! Declarations and scopes are the two kinds of node looked up by identity
//! from many places (name resolution, override checking), so both live in
//! arenas owned by [`Program`] and are addressed by the typed indices
//! [`DeclId`]/[`ScopeId`] rather than by pointer or `Rc` — the natural fix
//! for cyclic references (a class's own scope pointing back at it, an
//! ancestor class pointing at a descendant). Statements and expressions are
//! not looked up by identity — they stay a plain `Box`-linked tree (see
//! `stmt.rs`/`expr.rs`).

use crate::stmt::StmtBlock;
use crate::types::Type;
use indexmap::IndexMap;
use juno_util::{define_idx, IndexVec, Span, Symbol};

define_idx! {
    /// Index into [`Program::decls`].
    pub struct DeclId;
}

define_idx! {
    /// Index into [`Program::scopes`].
    pub struct ScopeId;
}

/// A lexical scope: a symbol table plus a non-owning parent link and the
/// context tags enclosing-context queries need.
#[derive(Debug)]
pub struct Scope {
    /// Insertion-ordered so diagnostics iterate declarations in first-seen
    /// order — this is exactly why `indexmap::IndexMap` is used here instead
    /// of `std::collections::HashMap`.
    pub table: IndexMap<Symbol, DeclId>,
    pub parent: Option<ScopeId>,
    pub class_ctx: Option<DeclId>,
    pub fn_ctx: Option<DeclId>,
    pub in_loop: bool,
    pub in_switch: bool,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Self {
            table: IndexMap::new(),
            parent,
            class_ctx: None,
            fn_ctx: None,
            in_loop: false,
            in_switch: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: Symbol,
    pub span: Span,
    pub declared_type: Type,
    pub scope: ScopeId,
}

impl VarDecl {
    pub fn new(name: Symbol, span: Span, declared_type: Type, scope: ScopeId) -> Self {
        Self { name, span, declared_type, scope }
    }
}

#[derive(Debug, Clone)]
pub struct FnDecl {
    pub name: Symbol,
    pub span: Span,
    pub return_type: Type,
    /// Ordered formal parameters, as `DeclId`s into `VarDecl`s in `own_scope`.
    pub formals: Vec<DeclId>,
    /// Absent for an interface method, which has no body.
    pub body: Option<StmtBlock>,
    /// The scope this declaration lives in (its enclosing class/interface or
    /// the global scope).
    pub scope: ScopeId,
    /// The scope this declaration introduces for its formals and body.
    pub own_scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: Symbol,
    pub span: Span,
    pub extends: Option<Type>,
    pub implements: Vec<Type>,
    /// Ordered members, a mix of `VarDecl` and `FnDecl` ids.
    pub members: Vec<DeclId>,
    pub scope: ScopeId,
    pub own_scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: Symbol,
    pub span: Span,
    /// Ordered members, all `FnDecl`, all bodiless.
    pub members: Vec<DeclId>,
    pub scope: ScopeId,
    pub own_scope: ScopeId,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

impl Decl {
    pub fn name(&self) -> Symbol {
        match self {
            Decl::Var(d) => d.name,
            Decl::Fn(d) => d.name,
            Decl::Class(d) => d.name,
            Decl::Interface(d) => d.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Decl::Var(d) => d.span,
            Decl::Fn(d) => d.span,
            Decl::Class(d) => d.span,
            Decl::Interface(d) => d.span,
        }
    }

    pub fn as_var(&self) -> Option<&VarDecl> {
        match self {
            Decl::Var(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_fn(&self) -> Option<&FnDecl> {
        match self {
            Decl::Fn(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match self {
            Decl::Class(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceDecl> {
        match self {
            Decl::Interface(d) => Some(d),
            _ => None,
        }
    }
}

/// The single top-level container: an ordered list of top-level
/// declarations plus the arenas that own every scope and declaration in the
/// program.
#[derive(Debug)]
pub struct Program {
    pub decls: IndexVec<DeclId, Decl>,
    pub scopes: IndexVec<ScopeId, Scope>,
    pub top_level: Vec<DeclId>,
    pub global_scope: ScopeId,
}

impl Program {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let global_scope = scopes.push(Scope::new(None));
        Self { decls: IndexVec::new(), scopes, top_level: Vec::new(), global_scope }
    }

    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        self.decls.push(decl)
    }

    pub fn alloc_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope::new(Some(parent)))
    }

    pub fn add_top_level(&mut self, id: DeclId) {
        self.top_level.push(id);
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_program_has_one_global_scope() {
        let p = Program::new();
        assert_eq!(p.scopes.len(), 1);
        assert_eq!(p.global_scope, ScopeId(0));
        assert!(p.scopes[p.global_scope].parent.is_none());
    }

    #[test]
    fn alloc_scope_links_to_parent() {
        let mut p = Program::new();
        let child = p.alloc_scope(p.global_scope);
        assert_eq!(p.scopes[child].parent, Some(p.global_scope));
    }

    #[test]
    fn alloc_decl_returns_distinct_ids() {
        let mut p = Program::new();
        let a = p.alloc_decl(Decl::Var(VarDecl::new(
            Symbol::intern("a"),
            Span::DUMMY,
            Type::INT,
            p.global_scope,
        )));
        let b = p.alloc_decl(Decl::Var(VarDecl::new(
            Symbol::intern("b"),
            Span::DUMMY,
            Type::INT,
            p.global_scope,
        )));
        assert_ne!(a, b);
    }

    #[test]
    fn decl_name_dispatches_by_variant() {
        let p = Program::new();
        let v = Decl::Var(VarDecl::new(Symbol::intern("x"), Span::DUMMY, Type::INT, p.global_scope));
        assert_eq!(v.name().as_str(), "x");
    }
}
