//! `TypeOf`: purely structural type synthesis. Never emits diagnostics —
//! every undecidable case falls back to `errorType` so a missing declaration
//! doesn't cascade into unrelated errors.

use juno_ast::decl::Decl;
use juno_ast::expr::{ArithmeticExpr, CallExpr, EqualityExpr, Expr, FieldAccessExpr, LogicalExpr, RelationalExpr};
use juno_ast::{Program, Type};

use crate::lookup::{enclosing_class, extends_of, resolve_member, resolve_name, resolve_type_decl};

pub fn type_of(program: &Program, expr: &Expr) -> Type {
    match expr {
        Expr::IntConst(_) => Type::INT,
        Expr::DoubleConst(_) => Type::DOUBLE,
        Expr::BoolConst(_) => Type::BOOL,
        Expr::StringConst(_) => Type::STRING,
        Expr::NullConst(_) => Type::NULL,
        Expr::Empty(_) => Type::ERROR,
        Expr::This(e) => match enclosing_class(program, e.scope) {
            Some(class_id) => Type::named(program.decls[class_id].name(), e.span),
            None => Type::ERROR,
        },
        Expr::ArrayAccess(e) => match type_of(program, &e.base) {
            Type::Array(elem) => *elem,
            _ => Type::ERROR,
        },
        Expr::FieldAccess(e) => field_access_type(program, e),
        Expr::Call(e) => call_type(program, e),
        Expr::New(e) => match resolve_type_decl(program, e.class_name) {
            Some(id) if matches!(program.decls[id], Decl::Class(_)) => Type::named(e.class_name, e.span),
            _ => Type::ERROR,
        },
        Expr::NewArray(e) => Type::array(e.elem_type.clone()),
        Expr::ReadInteger(_) => Type::INT,
        Expr::ReadLine(_) => Type::STRING,
        Expr::Postfix(e) => {
            if type_of(program, &e.operand) == Type::INT {
                Type::INT
            } else {
                Type::ERROR
            }
        }
        Expr::Arithmetic(e) => arithmetic_type(program, e),
        Expr::Relational(e) => relational_type(program, e),
        Expr::Equality(e) => equality_type(program, e),
        Expr::Logical(e) => logical_type(program, e),
        Expr::Assign(e) => assign_type(program, e),
    }
}

/// `b.f` / bare `f`: the `VarDecl`'s declared type, or `errorType` if lookup
/// fails or resolves to something other than a variable.
fn field_access_type(program: &Program, e: &FieldAccessExpr) -> Type {
    let decl_id = match &e.base {
        Some(base) => type_of(program, base)
            .as_named()
            .and_then(|named| resolve_type_decl(program, named.name))
            .and_then(|type_decl| resolve_member(program, type_decl, e.field)),
        None => resolve_name(program, e.scope, e.field),
    };
    match decl_id.and_then(|id| program.decls[id].as_var()) {
        Some(v) => v.declared_type.clone(),
        None => Type::ERROR,
    }
}

/// `b.f(...)` / bare `f(...)`: the function's return type, special-cased for
/// `arr.length()`.
fn call_type(program: &Program, e: &CallExpr) -> Type {
    match &e.base {
        Some(base) => {
            let base_t = type_of(program, base);
            if base_t.is_array() && e.method.eq_str("length") {
                return Type::INT;
            }
            match base_t
                .as_named()
                .and_then(|named| resolve_type_decl(program, named.name))
                .and_then(|type_decl| resolve_member(program, type_decl, e.method))
                .and_then(|id| program.decls[id].as_fn())
            {
                Some(f) => f.return_type.clone(),
                None => Type::ERROR,
            }
        }
        None => match resolve_name(program, e.scope, e.method).and_then(|id| program.decls[id].as_fn()) {
            Some(f) => f.return_type.clone(),
            None => Type::ERROR,
        },
    }
}

/// Shared numeric kind if both sides match; unary `-` permits `int`/`double`.
fn arithmetic_type(program: &Program, e: &ArithmeticExpr) -> Type {
    let left_t = type_of(program, &e.left);
    match &e.right {
        Some(right) => {
            let right_t = type_of(program, right);
            if left_t.is_numeric() && left_t == right_t {
                left_t
            } else {
                Type::ERROR
            }
        }
        None => {
            if left_t.is_numeric() {
                left_t
            } else {
                Type::ERROR
            }
        }
    }
}

/// `bool` when the operand kinds match (`int`/`int` or `double`/`double`),
/// `errorType` otherwise.
fn relational_type(program: &Program, e: &RelationalExpr) -> Type {
    let l = type_of(program, &e.left);
    let r = type_of(program, &e.right);
    let matches = (l == Type::INT && r == Type::INT) || (l == Type::DOUBLE && r == Type::DOUBLE);
    if matches {
        Type::BOOL
    } else {
        Type::ERROR
    }
}

/// `bool` if either side is assignable to the other, else `errorType`.
fn equality_type(program: &Program, e: &EqualityExpr) -> Type {
    let l = type_of(program, &e.left);
    let r = type_of(program, &e.right);
    let extends = extends_of(program);
    if l.equivalent(&r, &extends) || r.equivalent(&l, &extends) {
        Type::BOOL
    } else {
        Type::ERROR
    }
}

/// `bool` if every operand is `bool`, else `errorType`.
fn logical_type(program: &Program, e: &LogicalExpr) -> Type {
    if type_of(program, &e.left) != Type::BOOL {
        return Type::ERROR;
    }
    match &e.right {
        Some(r) => {
            if type_of(program, r) == Type::BOOL {
                Type::BOOL
            } else {
                Type::ERROR
            }
        }
        None => Type::BOOL,
    }
}

/// Right-assignable-to-left yields the left side's type, else `errorType`.
fn assign_type(program: &Program, e: &juno_ast::expr::AssignExpr) -> Type {
    let target_t = type_of(program, &e.target);
    let value_t = type_of(program, &e.value);
    let extends = extends_of(program);
    if value_t.equivalent(&target_t, &extends) {
        target_t
    } else {
        Type::ERROR
    }
}
