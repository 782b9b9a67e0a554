//! Phase 1: the scope builder.
//!
//! Every scope already exists with its parent link set by the time this
//! runs — `Program::alloc_scope` (juno-ast) wires up the parent link at
//! node-creation time. So the scope builder's job here narrows to exactly
//! the part that needs a top-down walk: inserting each node's declarations
//! into its scope's table (detecting same-scope duplicates) and tagging
//! scopes with their enclosing class/function/loop/switch.

use juno_ast::decl::{Decl, DeclId, ScopeId};
use juno_ast::expr::Expr;
use juno_ast::stmt::{Stmt, StmtBlock};
use juno_ast::Program;
use juno_util::IndexVec;

use crate::reporter::Reporter;

pub fn build_scopes(program: &mut Program, reporter: &Reporter) {
    let global = program.global_scope;
    let top_level = program.top_level.clone();
    for &id in &top_level {
        insert_decl(&program.decls, &mut program.scopes, reporter, global, id);
    }
    for &id in &top_level {
        build_decl(&program.decls, &mut program.scopes, reporter, id);
    }
}

/// Inserts `decl_id` into `scope_id`'s table, reporting `DeclConflict`
/// against the first-seen declaration if the name is already bound in this
/// exact scope — only same-scope redeclaration is rejected, shadowing an
/// outer scope is silent.
fn insert_decl(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    scope_id: ScopeId,
    decl_id: DeclId,
) {
    let name = decls[decl_id].name();
    let span = decls[decl_id].span();
    let prior = scopes[scope_id].table.get(&name).copied();
    if let Some(prior_id) = prior {
        reporter.decl_conflict(name, span, decls[prior_id].span());
        return;
    }
    scopes[scope_id].table.insert(name, decl_id);
}

fn build_decl(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    decl_id: DeclId,
) {
    match &decls[decl_id] {
        Decl::Var(_) => {}
        Decl::Fn(_) => build_fn(decls, scopes, reporter, decl_id),
        Decl::Class(_) => build_class(decls, scopes, reporter, decl_id),
        Decl::Interface(_) => build_interface(decls, scopes, reporter, decl_id),
    }
}

fn build_fn(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    fn_id: DeclId,
) {
    let f = decls[fn_id].as_fn().expect("build_fn called on a non-FnDecl");
    let own_scope = f.own_scope;
    scopes[own_scope].fn_ctx = Some(fn_id);
    for &formal in &f.formals {
        insert_decl(decls, scopes, reporter, own_scope, formal);
    }
    if let Some(body) = &f.body {
        build_stmt_block(decls, scopes, reporter, body);
    }
}

fn build_class(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    class_id: DeclId,
) {
    let c = decls[class_id].as_class().expect("build_class called on a non-ClassDecl");
    let own_scope = c.own_scope;
    let members = c.members.clone();
    scopes[own_scope].class_ctx = Some(class_id);
    for &m in &members {
        insert_decl(decls, scopes, reporter, own_scope, m);
    }
    for &m in &members {
        build_decl(decls, scopes, reporter, m);
    }
}

fn build_interface(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    iface_id: DeclId,
) {
    let i = decls[iface_id].as_interface().expect("build_interface called on a non-InterfaceDecl");
    let own_scope = i.own_scope;
    let members = i.members.clone();
    for &m in &members {
        insert_decl(decls, scopes, reporter, own_scope, m);
    }
    for &m in &members {
        build_decl(decls, scopes, reporter, m);
    }
}

fn build_stmt_block(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    block: &StmtBlock,
) {
    for &d in &block.decls {
        insert_decl(decls, scopes, reporter, block.scope, d);
    }
    for s in &block.stmts {
        build_stmt(decls, scopes, reporter, s);
    }
}

fn build_stmt(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    stmt: &Stmt,
) {
    match stmt {
        Stmt::Block(b) => build_stmt_block(decls, scopes, reporter, b),
        Stmt::If(s) => {
            build_expr(decls, scopes, reporter, &s.test);
            build_stmt(decls, scopes, reporter, &s.then_branch);
            if let Some(e) = &s.else_branch {
                build_stmt(decls, scopes, reporter, e);
            }
        }
        Stmt::While(s) => {
            scopes[s.scope].in_loop = true;
            build_expr(decls, scopes, reporter, &s.test);
            build_stmt(decls, scopes, reporter, &s.body);
        }
        Stmt::For(s) => {
            scopes[s.scope].in_loop = true;
            build_expr(decls, scopes, reporter, &s.init);
            build_expr(decls, scopes, reporter, &s.test);
            build_expr(decls, scopes, reporter, &s.step);
            build_stmt(decls, scopes, reporter, &s.body);
        }
        Stmt::Switch(s) => {
            scopes[s.scope].in_switch = true;
            build_expr(decls, scopes, reporter, &s.scrutinee);
            for case in &s.cases {
                if let Some(label) = &case.label {
                    build_expr(decls, scopes, reporter, label);
                }
                for st in &case.body {
                    build_stmt(decls, scopes, reporter, st);
                }
            }
        }
        Stmt::Return(s) => build_expr(decls, scopes, reporter, &s.value),
        Stmt::Break(_) => {}
        Stmt::Print(s) => {
            for a in &s.args {
                build_expr(decls, scopes, reporter, a);
            }
        }
        Stmt::Expr(s) => build_expr(decls, scopes, reporter, &s.expr),
    }
}

/// Expressions never introduce declarations, so this is a pure traversal —
/// kept symmetric with the statement/declaration walks rather than skipped,
/// since a future extension (e.g. lambda expressions with their own scope)
/// would need exactly this shape.
fn build_expr(
    decls: &IndexVec<DeclId, Decl>,
    scopes: &mut IndexVec<ScopeId, juno_ast::decl::Scope>,
    reporter: &Reporter,
    expr: &Expr,
) {
    match expr {
        Expr::ArrayAccess(e) => {
            build_expr(decls, scopes, reporter, &e.base);
            build_expr(decls, scopes, reporter, &e.subscript);
        }
        Expr::FieldAccess(e) => {
            if let Some(base) = &e.base {
                build_expr(decls, scopes, reporter, base);
            }
        }
        Expr::Call(e) => {
            if let Some(base) = &e.base {
                build_expr(decls, scopes, reporter, base);
            }
            for a in &e.args {
                build_expr(decls, scopes, reporter, a);
            }
        }
        Expr::NewArray(e) => build_expr(decls, scopes, reporter, &e.size),
        Expr::Postfix(e) => build_expr(decls, scopes, reporter, &e.operand),
        Expr::Arithmetic(e) => {
            build_expr(decls, scopes, reporter, &e.left);
            if let Some(r) = &e.right {
                build_expr(decls, scopes, reporter, r);
            }
        }
        Expr::Relational(e) => {
            build_expr(decls, scopes, reporter, &e.left);
            build_expr(decls, scopes, reporter, &e.right);
        }
        Expr::Equality(e) => {
            build_expr(decls, scopes, reporter, &e.left);
            build_expr(decls, scopes, reporter, &e.right);
        }
        Expr::Logical(e) => {
            build_expr(decls, scopes, reporter, &e.left);
            if let Some(r) = &e.right {
                build_expr(decls, scopes, reporter, r);
            }
        }
        Expr::Assign(e) => {
            build_expr(decls, scopes, reporter, &e.target);
            build_expr(decls, scopes, reporter, &e.value);
        }
        Expr::IntConst(_)
        | Expr::DoubleConst(_)
        | Expr::BoolConst(_)
        | Expr::StringConst(_)
        | Expr::NullConst(_)
        | Expr::Empty(_)
        | Expr::This(_)
        | Expr::New(_)
        | Expr::ReadInteger(_)
        | Expr::ReadLine(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juno_ast::decl::VarDecl;
    use juno_ast::types::Type;
    use juno_util::{Handler, Span, Symbol};

    #[test]
    fn duplicate_top_level_names_conflict() {
        let mut program = Program::new();
        let global = program.global_scope;
        let a = program.alloc_decl(Decl::Var(VarDecl::new(Symbol::intern("x"), Span::DUMMY, Type::INT, global)));
        let b = program.alloc_decl(Decl::Var(VarDecl::new(Symbol::intern("x"), Span::DUMMY, Type::INT, global)));
        program.add_top_level(a);
        program.add_top_level(b);

        let handler = Handler::new();
        let reporter = Reporter::new(&handler);
        build_scopes(&mut program, &reporter);

        assert_eq!(handler.error_count(), 1);
        assert_eq!(program.scopes[global].table.get(&Symbol::intern("x")), Some(&a));
    }

    #[test]
    fn distinct_names_do_not_conflict() {
        let mut program = Program::new();
        let global = program.global_scope;
        let a = program.alloc_decl(Decl::Var(VarDecl::new(Symbol::intern("a"), Span::DUMMY, Type::INT, global)));
        let b = program.alloc_decl(Decl::Var(VarDecl::new(Symbol::intern("b"), Span::DUMMY, Type::INT, global)));
        program.add_top_level(a);
        program.add_top_level(b);

        let handler = Handler::new();
        let reporter = Reporter::new(&handler);
        build_scopes(&mut program, &reporter);

        assert_eq!(handler.error_count(), 0);
        assert_eq!(program.scopes[global].table.len(), 2);
    }
}
