//! Lookup primitives reused throughout phase 2: name resolution up a scope
//! chain, member resolution on a class/interface, and the enclosing-context
//! queries `This`/`ReturnStmt`/`BreakStmt` rely on.

use juno_ast::decl::{Decl, DeclId, ScopeId};
use juno_ast::Program;
use juno_util::Symbol;

/// `ResolveName(name, scope)`: walk the parent chain, return the first
/// declaration whose table binds `name`.
pub fn resolve_name(program: &Program, scope: ScopeId, name: Symbol) -> Option<DeclId> {
    let mut current = Some(scope);
    while let Some(s) = current {
        if let Some(&id) = program.scopes[s].table.get(&name) {
            return Some(id);
        }
        current = program.scopes[s].parent;
    }
    None
}

/// Resolves a type name to its `ClassDecl`/`InterfaceDecl` in the global
/// scope.
pub fn resolve_type_decl(program: &Program, name: Symbol) -> Option<DeclId> {
    let id = program.scopes[program.global_scope].table.get(&name).copied()?;
    match &program.decls[id] {
        Decl::Class(_) | Decl::Interface(_) => Some(id),
        _ => None,
    }
}

/// `ResolveMember(name, type)`: search a class/interface's own scope, then
/// (for a class) its `extends` ancestors.
///
/// Only the `extends` chain is walked, never `implements` — a method a class
/// only picks up from an interface's signature is invisible here. This
/// primitive backs both `TypeOf`'s member lookup and the checker's no-base
/// `FieldAccess`/`Call` resolution, since both treat `ResolveMember` as one
/// operation reused everywhere in phase 2.
pub fn resolve_member(program: &Program, type_decl: DeclId, name: Symbol) -> Option<DeclId> {
    let mut current = Some(type_decl);
    let mut guard = 0usize;
    while let Some(id) = current {
        if guard > 10_000 {
            // A cyclic `extends` chain; the checker reports this separately
            // (`INHERITANCE_CYCLE`) rather than hanging here.
            return None;
        }
        guard += 1;
        let own_scope = match &program.decls[id] {
            Decl::Class(c) => c.own_scope,
            Decl::Interface(i) => i.own_scope,
            _ => return None,
        };
        if let Some(&member) = program.scopes[own_scope].table.get(&name) {
            return Some(member);
        }
        current = match &program.decls[id] {
            Decl::Class(c) => {
                c.extends.as_ref().and_then(|t| t.as_named()).and_then(|n| resolve_type_decl(program, n.name))
            }
            _ => None,
        };
    }
    None
}

/// Walks a class's `extends` chain, reporting the first repeated class
/// encountered, so a cyclic chain is caught up front rather than left to
/// hang `ResolveMember`. Returns `None` for an acyclic chain.
pub fn find_inheritance_cycle(program: &Program, class_id: DeclId) -> Option<DeclId> {
    let mut seen = vec![class_id];
    let mut current = match program.decls[class_id].as_class() {
        Some(c) => c.extends.as_ref().and_then(|t| t.as_named()).and_then(|n| resolve_type_decl(program, n.name)),
        None => return None,
    };
    while let Some(id) = current {
        if seen.contains(&id) {
            return Some(id);
        }
        seen.push(id);
        current = match program.decls[id].as_class() {
            Some(c) => {
                c.extends.as_ref().and_then(|t| t.as_named()).and_then(|n| resolve_type_decl(program, n.name))
            }
            None => None,
        };
    }
    None
}

/// A closure suitable for [`juno_ast::Type::equivalent`]'s `extends_of`
/// parameter: looks up a class by name and reports the `NamedType` its
/// `extends` clause names, if any.
pub fn extends_of(program: &Program) -> impl Fn(Symbol) -> Option<Symbol> + '_ {
    move |name: Symbol| {
        let decl_id = resolve_type_decl(program, name)?;
        match &program.decls[decl_id] {
            Decl::Class(c) => c.extends.as_ref().and_then(|t| t.as_named()).map(|n| n.name),
            _ => None,
        }
    }
}

/// First enclosing `ClassDecl`, walking scope parents.
pub fn enclosing_class(program: &Program, scope: ScopeId) -> Option<DeclId> {
    let mut current = Some(scope);
    while let Some(s) = current {
        if let Some(id) = program.scopes[s].class_ctx {
            return Some(id);
        }
        current = program.scopes[s].parent;
    }
    None
}

/// First enclosing `FnDecl`, walking scope parents.
pub fn enclosing_fn(program: &Program, scope: ScopeId) -> Option<DeclId> {
    let mut current = Some(scope);
    while let Some(s) = current {
        if let Some(id) = program.scopes[s].fn_ctx {
            return Some(id);
        }
        current = program.scopes[s].parent;
    }
    None
}

/// Whether `scope` is lexically inside a loop or a switch — the condition
/// that makes a `break` there legal.
pub fn enclosing_loop_or_switch(program: &Program, scope: ScopeId) -> bool {
    let mut current = Some(scope);
    while let Some(s) = current {
        let scope_data = &program.scopes[s];
        if scope_data.in_loop || scope_data.in_switch {
            return true;
        }
        current = scope_data.parent;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use juno_ast::decl::{ClassDecl, VarDecl};
    use juno_ast::types::Type;
    use juno_ast::Decl;
    use juno_util::Span;

    #[test]
    fn resolve_name_walks_parent_chain() {
        let mut program = Program::new();
        let global = program.global_scope;
        let v = program.alloc_decl(Decl::Var(VarDecl::new(Symbol::intern("g"), Span::DUMMY, Type::INT, global)));
        program.scopes[global].table.insert(Symbol::intern("g"), v);

        let child = program.alloc_scope(global);
        assert_eq!(resolve_name(&program, child, Symbol::intern("g")), Some(v));
        assert_eq!(resolve_name(&program, child, Symbol::intern("missing")), None);
    }

    #[test]
    fn resolve_member_walks_extends_chain() {
        let mut program = Program::new();
        let global = program.global_scope;

        let animal_scope = program.alloc_scope(global);
        let speak = program.alloc_decl(Decl::Var(VarDecl::new(
            Symbol::intern("sound"),
            Span::DUMMY,
            Type::STRING,
            animal_scope,
        )));
        program.scopes[animal_scope].table.insert(Symbol::intern("sound"), speak);
        let animal = program.alloc_decl(Decl::Class(ClassDecl {
            name: Symbol::intern("Animal_lookup_test"),
            span: Span::DUMMY,
            extends: None,
            implements: Vec::new(),
            members: vec![speak],
            scope: global,
            own_scope: animal_scope,
        }));
        program.scopes[global].table.insert(Symbol::intern("Animal_lookup_test"), animal);

        let dog_scope = program.alloc_scope(global);
        let dog = program.alloc_decl(Decl::Class(ClassDecl {
            name: Symbol::intern("Dog_lookup_test"),
            span: Span::DUMMY,
            extends: Some(Type::named(Symbol::intern("Animal_lookup_test"), Span::DUMMY)),
            implements: Vec::new(),
            members: Vec::new(),
            scope: global,
            own_scope: dog_scope,
        }));
        program.scopes[global].table.insert(Symbol::intern("Dog_lookup_test"), dog);

        assert_eq!(resolve_member(&program, dog, Symbol::intern("sound")), Some(speak));
        assert_eq!(resolve_member(&program, dog, Symbol::intern("nonexistent")), None);
    }

    #[test]
    fn find_inheritance_cycle_detects_self_extension() {
        let mut program = Program::new();
        let global = program.global_scope;
        let own_scope = program.alloc_scope(global);
        let a = program.alloc_decl(Decl::Class(ClassDecl {
            name: Symbol::intern("A_cycle_test"),
            span: Span::DUMMY,
            extends: Some(Type::named(Symbol::intern("A_cycle_test"), Span::DUMMY)),
            implements: Vec::new(),
            members: Vec::new(),
            scope: global,
            own_scope,
        }));
        program.scopes[global].table.insert(Symbol::intern("A_cycle_test"), a);

        assert_eq!(find_inheritance_cycle(&program, a), Some(a));
    }

    #[test]
    fn find_inheritance_cycle_is_none_for_acyclic_chain() {
        let mut program = Program::new();
        let global = program.global_scope;
        let base_scope = program.alloc_scope(global);
        let base = program.alloc_decl(Decl::Class(ClassDecl {
            name: Symbol::intern("Base_cycle_test"),
            span: Span::DUMMY,
            extends: None,
            implements: Vec::new(),
            members: Vec::new(),
            scope: global,
            own_scope: base_scope,
        }));
        program.scopes[global].table.insert(Symbol::intern("Base_cycle_test"), base);

        let sub_scope = program.alloc_scope(global);
        let sub = program.alloc_decl(Decl::Class(ClassDecl {
            name: Symbol::intern("Sub_cycle_test"),
            span: Span::DUMMY,
            extends: Some(Type::named(Symbol::intern("Base_cycle_test"), Span::DUMMY)),
            implements: Vec::new(),
            members: Vec::new(),
            scope: global,
            own_scope: sub_scope,
        }));
        program.scopes[global].table.insert(Symbol::intern("Sub_cycle_test"), sub);

        assert_eq!(find_inheritance_cycle(&program, sub), None);
    }
}
