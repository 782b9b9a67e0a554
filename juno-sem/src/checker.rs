//! Phase 2: the checker. Recurses children-first into every node,
//! synthesising each expression's type via `type_of` and emitting
//! diagnostics through a [`Reporter`].
//!
//! **Error-suppression rule**: once an immediate sub-expression's type is
//! `errorType`, or a `NamedType` has failed to resolve, no further
//! diagnostics are emitted about that subtree. Rather than mutating a
//! `typeDeclared` flag in place on each `NamedType` node, this keeps a side
//! table keyed by the unresolved name itself (`suppressed_types`, a set of
//! `Symbol`s) so phase 2 never needs `&mut Program`. Keying on the name
//! rather than the `NamedType` node's address is deliberate: `type_of`
//! freely clones `Type`/`NamedType` values when it synthesizes a field's,
//! call's, or array element's type, and a clone's address never matches the
//! one recorded at the declaration site. A type name is resolved once
//! against the global scope, so if it fails to resolve anywhere it fails
//! everywhere — suppressing every further `Type::Named` with that name is
//! exactly as precise as suppressing the one `NamedType` node that first
//! reported it.

use std::cell::RefCell;

use juno_ast::decl::{Decl, DeclId, FnDecl};
use juno_ast::expr::{CallExpr, Expr, FieldAccessExpr};
use juno_ast::types::{NamedType, Primitive};
use juno_ast::stmt::{Stmt, StmtBlock};
use juno_ast::{Program, Type};
use juno_util::{FxHashSet, Symbol};

use crate::lookup::{
    enclosing_class, enclosing_fn, enclosing_loop_or_switch, extends_of, find_inheritance_cycle,
    resolve_member, resolve_name, resolve_type_decl,
};
use crate::reporter::{LookupReason, Reporter};
use crate::type_of::type_of;

/// Runs phase 2 over every top-level declaration.
pub fn check(program: &Program, reporter: &Reporter) {
    let checker = Checker::new(program, reporter);
    for &id in &program.top_level {
        checker.check_decl(id);
    }
}

struct Checker<'a> {
    program: &'a Program,
    reporter: &'a Reporter<'a>,
    suppressed_types: RefCell<FxHashSet<Symbol>>,
}

impl<'a> Checker<'a> {
    fn new(program: &'a Program, reporter: &'a Reporter<'a>) -> Self {
        Self { program, reporter, suppressed_types: RefCell::new(FxHashSet::default()) }
    }

    fn mark_undeclared(&self, named: &NamedType) {
        self.suppressed_types.borrow_mut().insert(named.name);
    }

    fn is_undeclared(&self, named: &NamedType) -> bool {
        self.suppressed_types.borrow().contains(&named.name)
    }

    fn is_suppressed(&self, t: &Type) -> bool {
        match t {
            Type::Primitive(Primitive::Error) => true,
            Type::Named(n) => self.is_undeclared(n),
            _ => false,
        }
    }

    // ---- Declarations ----------------------------------------------------

    fn check_decl(&self, id: DeclId) {
        match &self.program.decls[id] {
            Decl::Var(v) => self.check_var_decl(v),
            Decl::Fn(f) => self.check_fn_decl(f),
            Decl::Class(c) => self.check_class_decl(id, c),
            Decl::Interface(i) => self.check_interface_decl(i),
        }
    }

    fn check_var_decl(&self, v: &juno_ast::decl::VarDecl) {
        if let Type::Named(named) = &v.declared_type {
            match resolve_name(self.program, v.scope, named.name) {
                Some(id) if matches!(self.program.decls[id], Decl::Class(_) | Decl::Interface(_)) => {}
                _ => {
                    self.reporter.identifier_not_declared(named.name, LookupReason::Type, named.span);
                    self.mark_undeclared(named);
                }
            }
        }
    }

    fn check_fn_decl(&self, f: &FnDecl) {
        for &formal in &f.formals {
            if let Some(v) = self.program.decls[formal].as_var() {
                self.check_var_decl(v);
            }
        }
        if let Some(body) = &f.body {
            self.check_stmt_block(body);
        }
    }

    fn check_class_decl(&self, class_id: DeclId, c: &juno_ast::decl::ClassDecl) {
        for &m in &c.members {
            self.check_decl(m);
        }

        if let Some(Type::Named(named)) = &c.extends {
            match resolve_name(self.program, c.scope, named.name) {
                Some(id) if matches!(self.program.decls[id], Decl::Class(_)) => {}
                _ => {
                    self.reporter.identifier_not_declared(named.name, LookupReason::Class, named.span);
                    self.mark_undeclared(named);
                }
            }
        }

        for t in &c.implements {
            if let Type::Named(named) = t {
                match resolve_name(self.program, c.scope, named.name) {
                    Some(id) if matches!(self.program.decls[id], Decl::Interface(_)) => {}
                    _ => {
                        self.reporter.identifier_not_declared(named.name, LookupReason::Interface, named.span);
                        self.mark_undeclared(named);
                    }
                }
            }
        }

        if find_inheritance_cycle(self.program, class_id).is_some() {
            self.reporter.inheritance_cycle(c.name, c.span);
            return;
        }

        self.check_overrides(c);
        self.check_interface_conformance(class_id, c);
    }

    fn check_interface_decl(&self, i: &juno_ast::decl::InterfaceDecl) {
        for &m in &i.members {
            if let Some(f) = self.program.decls[m].as_fn() {
                for &formal in &f.formals {
                    if let Some(v) = self.program.decls[formal].as_var() {
                        self.check_var_decl(v);
                    }
                }
            }
        }
    }

    /// Every ancestor-class or implemented-interface member with the same
    /// name as one of `c`'s own members either conflicts (ancestor slot is a
    /// variable) or must have an equivalent signature (ancestor slot is a
    /// function).
    fn check_overrides(&self, c: &juno_ast::decl::ClassDecl) {
        let mut ancestors = Vec::new();
        let mut current = c.extends.as_ref().and_then(Type::as_named).and_then(|n| resolve_type_decl(self.program, n.name));
        while let Some(id) = current {
            ancestors.push(id);
            current = self.program.decls[id]
                .as_class()
                .and_then(|cl| cl.extends.as_ref())
                .and_then(Type::as_named)
                .and_then(|n| resolve_type_decl(self.program, n.name));
        }

        let interfaces: Vec<DeclId> = c
            .implements
            .iter()
            .filter_map(Type::as_named)
            .filter_map(|named| resolve_type_decl(self.program, named.name))
            .filter(|&id| matches!(self.program.decls[id], Decl::Interface(_)))
            .collect();

        for &member_id in &c.members {
            let member = &self.program.decls[member_id];
            let name = member.name();
            for &ancestor_id in ancestors.iter().chain(interfaces.iter()) {
                let ancestor_scope = match &self.program.decls[ancestor_id] {
                    Decl::Class(cl) => cl.own_scope,
                    Decl::Interface(i) => i.own_scope,
                    _ => continue,
                };
                let Some(&ancestor_member_id) = self.program.scopes[ancestor_scope].table.get(&name) else {
                    continue;
                };
                match &self.program.decls[ancestor_member_id] {
                    Decl::Var(av) => self.reporter.decl_conflict(name, member.span(), av.span),
                    Decl::Fn(af) => match member {
                        Decl::Fn(mf) => {
                            if !signatures_equivalent(self.program, mf, af) {
                                self.reporter.override_mismatch(name, mf.span);
                            }
                        }
                        _ => self.reporter.override_mismatch(name, member.span()),
                    },
                    _ => {}
                }
            }
        }
    }

    /// Every member of an implemented interface must resolve in the class or
    /// one of its ancestors; the first miss short-circuits that interface.
    fn check_interface_conformance(&self, class_id: DeclId, c: &juno_ast::decl::ClassDecl) {
        for t in &c.implements {
            let Some(named) = t.as_named() else { continue };
            let Some(iface_id) = resolve_type_decl(self.program, named.name) else { continue };
            let Decl::Interface(iface) = &self.program.decls[iface_id] else { continue };
            for &member_id in &iface.members {
                let member_name = self.program.decls[member_id].name();
                if resolve_member(self.program, class_id, member_name).is_none() {
                    self.reporter.interface_not_implemented(c.name, named.name, c.span);
                    break;
                }
            }
        }
    }

    // ---- Statements --------------------------------------------------------

    fn check_stmt_block(&self, block: &StmtBlock) {
        for &d in &block.decls {
            self.check_decl(d);
        }
        for s in &block.stmts {
            self.check_stmt(s);
        }
    }

    fn check_stmt(&self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(b) => self.check_stmt_block(b),
            Stmt::If(s) => {
                let test_t = self.check_expr(&s.test);
                self.check_stmt(&s.then_branch);
                if let Some(e) = &s.else_branch {
                    self.check_stmt(e);
                }
                if !self.is_suppressed(&test_t) && test_t != Type::BOOL {
                    self.reporter.test_not_boolean(s.test.span());
                }
            }
            Stmt::While(s) => {
                let test_t = self.check_expr(&s.test);
                self.check_stmt(&s.body);
                if !self.is_suppressed(&test_t) && test_t != Type::BOOL {
                    self.reporter.test_not_boolean(s.test.span());
                }
            }
            Stmt::For(s) => {
                self.check_expr(&s.init);
                let test_t = self.check_expr(&s.test);
                self.check_expr(&s.step);
                self.check_stmt(&s.body);
                let test_omitted = matches!(&s.test, Expr::Empty(_));
                if !test_omitted && !self.is_suppressed(&test_t) && test_t != Type::BOOL {
                    self.reporter.test_not_boolean(s.test.span());
                }
            }
            Stmt::Switch(s) => {
                self.check_expr(&s.scrutinee);
                for case in &s.cases {
                    if let Some(label) = &case.label {
                        self.check_expr(label);
                    }
                    for st in &case.body {
                        self.check_stmt(st);
                    }
                }
            }
            Stmt::Return(s) => self.check_return(s),
            Stmt::Break(s) => {
                if !enclosing_loop_or_switch(self.program, s.scope) {
                    self.reporter.break_outside_loop(s.span);
                }
            }
            Stmt::Print(s) => {
                for (i, a) in s.args.iter().enumerate() {
                    let t = self.check_expr(a);
                    let ok = matches!(t, Type::Primitive(Primitive::Int | Primitive::Bool | Primitive::String));
                    if !self.is_suppressed(&t) && !ok {
                        self.reporter.print_arg_mismatch(i + 1, &t, a.span());
                    }
                }
            }
            Stmt::Expr(s) => {
                self.check_expr(&s.expr);
            }
        }
    }

    fn check_return(&self, s: &juno_ast::stmt::ReturnStmt) {
        let given = self.check_expr(&s.value);
        let fn_id = enclosing_fn(self.program, s.scope).unwrap_or_else(|| {
            // A syntactically valid program only contains `return` inside a
            // function body — the out-of-scope parser guarantees this.
            panic!("ReturnStmt at {:?} has no enclosing function", s.span)
        });
        let f = self.program.decls[fn_id].as_fn().expect("fn_ctx always names a FnDecl");
        let is_empty_return = matches!(&s.value, Expr::Empty(_));
        let ok = if is_empty_return {
            f.return_type == Type::VOID
        } else {
            let extends = extends_of(self.program);
            given.equivalent(&f.return_type, &extends)
        };
        if !ok && !self.is_suppressed(&given) {
            self.reporter.return_mismatch(&given, &f.return_type, s.span);
        }
    }

    // ---- Expressions ---------------------------------------------------

    fn check_expr(&self, expr: &Expr) -> Type {
        match expr {
            Expr::IntConst(_)
            | Expr::DoubleConst(_)
            | Expr::BoolConst(_)
            | Expr::StringConst(_)
            | Expr::NullConst(_)
            | Expr::Empty(_)
            | Expr::ReadInteger(_)
            | Expr::ReadLine(_) => type_of(self.program, expr),
            Expr::This(e) => {
                if enclosing_class(self.program, e.scope).is_none() {
                    self.reporter.this_outside_class_scope(e.span);
                }
                type_of(self.program, expr)
            }
            Expr::ArrayAccess(e) => {
                let base_t = self.check_expr(&e.base);
                let sub_t = self.check_expr(&e.subscript);
                if !self.is_suppressed(&base_t) && !base_t.is_array() {
                    self.reporter.brackets_on_non_array(&base_t, e.base.span());
                }
                if !self.is_suppressed(&sub_t) && sub_t != Type::INT {
                    self.reporter.subscript_not_integer(e.subscript.span());
                }
                type_of(self.program, expr)
            }
            Expr::FieldAccess(e) => {
                self.check_field_access(e);
                type_of(self.program, expr)
            }
            Expr::Call(e) => {
                self.check_call(e);
                type_of(self.program, expr)
            }
            Expr::New(e) => {
                let ok = resolve_type_decl(self.program, e.class_name)
                    .map(|id| matches!(self.program.decls[id], Decl::Class(_)))
                    .unwrap_or(false);
                if !ok {
                    self.reporter.identifier_not_declared(e.class_name, LookupReason::Class, e.span);
                }
                type_of(self.program, expr)
            }
            Expr::NewArray(e) => {
                let size_t = self.check_expr(&e.size);
                if !self.is_suppressed(&size_t) && size_t != Type::INT {
                    self.reporter.new_array_size_not_integer(e.size.span());
                }
                if let Type::Named(named) = &e.elem_type {
                    match resolve_name(self.program, e.scope, named.name) {
                        Some(id) if matches!(self.program.decls[id], Decl::Class(_) | Decl::Interface(_)) => {}
                        _ => self.reporter.identifier_not_declared(named.name, LookupReason::Type, e.span),
                    }
                }
                type_of(self.program, expr)
            }
            Expr::Postfix(e) => {
                let t = self.check_expr(&e.operand);
                if !self.is_suppressed(&t) && t != Type::INT {
                    self.reporter.incompatible_operand(&e.op.to_string(), &t, e.span);
                }
                type_of(self.program, expr)
            }
            Expr::Arithmetic(e) => {
                let left_t = self.check_expr(&e.left);
                match &e.right {
                    Some(right) => {
                        let right_t = self.check_expr(right);
                        let ok = left_t.is_numeric() && left_t == right_t;
                        if !self.is_suppressed(&left_t) && !self.is_suppressed(&right_t) && !ok {
                            self.reporter.incompatible_operands(&e.op.to_string(), &left_t, &right_t, e.span);
                        }
                    }
                    None => {
                        if !self.is_suppressed(&left_t) && !left_t.is_numeric() {
                            self.reporter.incompatible_operand(&e.op.to_string(), &left_t, e.span);
                        }
                    }
                }
                type_of(self.program, expr)
            }
            Expr::Relational(e) => {
                let left_t = self.check_expr(&e.left);
                let right_t = self.check_expr(&e.right);
                let ok = (left_t == Type::INT && right_t == Type::INT) || (left_t == Type::DOUBLE && right_t == Type::DOUBLE);
                if !self.is_suppressed(&left_t) && !self.is_suppressed(&right_t) && !ok {
                    self.reporter.incompatible_operands(&e.op.to_string(), &left_t, &right_t, e.span);
                }
                type_of(self.program, expr)
            }
            Expr::Equality(e) => {
                let left_t = self.check_expr(&e.left);
                let right_t = self.check_expr(&e.right);
                let extends = extends_of(self.program);
                let ok = left_t.equivalent(&right_t, &extends) || right_t.equivalent(&left_t, &extends);
                if !self.is_suppressed(&left_t) && !self.is_suppressed(&right_t) && !ok {
                    self.reporter.incompatible_operands(&e.op.to_string(), &left_t, &right_t, e.span);
                }
                type_of(self.program, expr)
            }
            Expr::Logical(e) => {
                let left_t = self.check_expr(&e.left);
                match &e.right {
                    Some(right) => {
                        let right_t = self.check_expr(right);
                        let ok = left_t == Type::BOOL && right_t == Type::BOOL;
                        if !self.is_suppressed(&left_t) && !self.is_suppressed(&right_t) && !ok {
                            self.reporter.incompatible_operands(&e.op.to_string(), &left_t, &right_t, e.span);
                        }
                    }
                    None => {
                        if !self.is_suppressed(&left_t) && left_t != Type::BOOL {
                            self.reporter.incompatible_operand(&e.op.to_string(), &left_t, e.span);
                        }
                    }
                }
                type_of(self.program, expr)
            }
            Expr::Assign(e) => {
                let target_t = self.check_expr(&e.target);
                let value_t = self.check_expr(&e.value);
                let extends = extends_of(self.program);
                let ok = self.is_suppressed(&target_t) || value_t.equivalent(&target_t, &extends);
                if !self.is_suppressed(&value_t) && !ok {
                    self.reporter.incompatible_operands("=", &value_t, &target_t, e.span);
                }
                type_of(self.program, expr)
            }
        }
    }

    fn check_field_access(&self, e: &FieldAccessExpr) {
        match &e.base {
            None => {
                let decl_id = resolve_name(self.program, e.scope, e.field)
                    .or_else(|| enclosing_class(self.program, e.scope).and_then(|cid| resolve_member(self.program, cid, e.field)));
                match decl_id {
                    Some(id) if matches!(self.program.decls[id], Decl::Var(_)) => {}
                    _ => self.reporter.identifier_not_declared(e.field, LookupReason::Variable, e.span),
                }
            }
            Some(base) => {
                let base_t = self.check_expr(base);
                if self.is_suppressed(&base_t) {
                    return;
                }
                let Some(named) = base_t.as_named() else {
                    self.reporter.field_not_found_in_base(e.field, &base_t, e.span);
                    return;
                };
                let Some(type_decl) = resolve_type_decl(self.program, named.name) else {
                    return;
                };
                match resolve_member(self.program, type_decl, e.field) {
                    Some(id) if matches!(self.program.decls[id], Decl::Var(_)) => {
                        if enclosing_class(self.program, e.scope).is_none() {
                            self.reporter.inaccessible_field(e.field, &base_t, e.span);
                        }
                    }
                    Some(_) => self.reporter.identifier_not_declared(e.field, LookupReason::Variable, e.span),
                    None => self.reporter.field_not_found_in_base(e.field, &base_t, e.span),
                }
            }
        }
    }

    fn check_call(&self, e: &CallExpr) {
        let base_t = e.base.as_ref().map(|b| self.check_expr(b));
        let arg_types: Vec<Type> = e.args.iter().map(|a| self.check_expr(a)).collect();

        match (&e.base, base_t) {
            (None, _) => {
                let decl_id = resolve_name(self.program, e.scope, e.method)
                    .or_else(|| enclosing_class(self.program, e.scope).and_then(|cid| resolve_member(self.program, cid, e.method)))
                    .filter(|&id| self.program.decls[id].as_fn().is_some());
                match decl_id {
                    Some(id) => self.check_args_against(e, self.program.decls[id].as_fn().unwrap(), &arg_types),
                    None => self.reporter.identifier_not_declared(e.method, LookupReason::Function, e.span),
                }
            }
            (Some(_), Some(base_t)) => {
                if self.is_suppressed(&base_t) {
                    return;
                }
                if base_t.is_array() && e.method.eq_str("length") {
                    return;
                }
                let resolved_fn = base_t
                    .as_named()
                    .and_then(|named| resolve_type_decl(self.program, named.name))
                    .and_then(|type_decl| resolve_member(self.program, type_decl, e.method))
                    .filter(|&id| self.program.decls[id].as_fn().is_some());
                match resolved_fn {
                    Some(id) => self.check_args_against(e, self.program.decls[id].as_fn().unwrap(), &arg_types),
                    None => self.reporter.field_not_found_in_base(e.method, &base_t, e.span),
                }
            }
            (Some(_), None) => unreachable!("base_t is computed whenever e.base is Some"),
        }
    }

    fn check_args_against(&self, e: &CallExpr, f: &FnDecl, arg_types: &[Type]) {
        if arg_types.len() != f.formals.len() {
            self.reporter.num_args_mismatch(e.method, f.formals.len(), arg_types.len(), e.span);
            return;
        }
        let extends = extends_of(self.program);
        for (i, (&formal_id, given)) in f.formals.iter().zip(arg_types.iter()).enumerate() {
            let Some(formal) = self.program.decls[formal_id].as_var() else { continue };
            if !self.is_suppressed(given) && !given.equivalent(&formal.declared_type, &extends) {
                self.reporter.arg_mismatch(i + 1, given, &formal.declared_type, e.args[i].span());
            }
        }
    }
}

/// Same arity, with `a`'s return type and each of `a`'s formals equivalent
/// to `b`'s in that order — `a` is the overriding member, `b` the ancestor
/// slot it must match. One-directional, not mutual: a member's return type
/// only needs to satisfy the ancestor's, the same way an argument only needs
/// to satisfy a formal's declared type, so a covariant return (a subclass
/// where the ancestor declared the superclass) is a legal override.
fn signatures_equivalent(program: &Program, a: &FnDecl, b: &FnDecl) -> bool {
    let extends = extends_of(program);
    if !a.return_type.equivalent(&b.return_type, &extends) || a.formals.len() != b.formals.len() {
        return false;
    }
    for (&fa, &fb) in a.formals.iter().zip(b.formals.iter()) {
        let (Some(va), Some(vb)) = (program.decls[fa].as_var(), program.decls[fb].as_var()) else {
            return false;
        };
        if !va.declared_type.equivalent(&vb.declared_type, &extends) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use juno_ast::decl::VarDecl;
    use juno_util::{Handler, Span};

    #[test]
    fn break_outside_loop_is_reported() {
        let mut program = Program::new();
        let global = program.global_scope;
        let body_scope = program.alloc_scope(global);
        let fn_scope = program.alloc_scope(global);
        let f = program.alloc_decl(Decl::Fn(FnDecl {
            name: Symbol::intern("g_break_test"),
            span: Span::DUMMY,
            return_type: Type::VOID,
            formals: Vec::new(),
            body: Some(StmtBlock {
                decls: Vec::new(),
                stmts: vec![Stmt::Break(juno_ast::stmt::BreakStmt { scope: body_scope, span: Span::DUMMY })],
                scope: body_scope,
                span: Span::DUMMY,
            }),
            scope: global,
            own_scope: fn_scope,
        }));
        program.add_top_level(f);

        let handler = Handler::new();
        let reporter = Reporter::new(&handler);
        crate::scope::build_scopes(&mut program, &reporter);
        check(&program, &reporter);

        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn this_outside_class_is_reported() {
        let mut program = Program::new();
        let global = program.global_scope;
        let fn_scope = program.alloc_scope(global);
        let body_scope = program.alloc_scope(fn_scope);
        let this_expr = Expr::This(juno_ast::expr::ThisExpr { scope: body_scope, span: Span::DUMMY });
        let f = program.alloc_decl(Decl::Fn(FnDecl {
            name: Symbol::intern("g_this_test"),
            span: Span::DUMMY,
            return_type: Type::BOOL,
            formals: Vec::new(),
            body: Some(StmtBlock {
                decls: Vec::new(),
                stmts: vec![Stmt::Return(juno_ast::stmt::ReturnStmt { value: this_expr, scope: body_scope, span: Span::DUMMY })],
                scope: body_scope,
                span: Span::DUMMY,
            }),
            scope: global,
            own_scope: fn_scope,
        }));
        program.add_top_level(f);

        let handler = Handler::new();
        let reporter = Reporter::new(&handler);
        crate::scope::build_scopes(&mut program, &reporter);
        check(&program, &reporter);

        assert!(handler.error_count() >= 1);
    }

    #[test]
    fn missing_type_is_reported_once() {
        let mut program = Program::new();
        let global = program.global_scope;
        let class_scope = program.alloc_scope(global);
        let b_field = program.alloc_decl(Decl::Var(VarDecl::new(
            Symbol::intern("b"),
            Span::DUMMY,
            Type::named(Symbol::intern("B_missing_test"), Span::DUMMY),
            class_scope,
        )));
        let class_a = program.alloc_decl(Decl::Class(juno_ast::decl::ClassDecl {
            name: Symbol::intern("A_missing_test"),
            span: Span::DUMMY,
            extends: None,
            implements: Vec::new(),
            members: vec![b_field],
            scope: global,
            own_scope: class_scope,
        }));
        program.add_top_level(class_a);

        let handler = Handler::new();
        let reporter = Reporter::new(&handler);
        crate::scope::build_scopes(&mut program, &reporter);
        check(&program, &reporter);

        assert_eq!(handler.error_count(), 1);
    }
}
