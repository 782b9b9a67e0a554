//! Expression nodes.
//!
//! Every variant carries its own `scope: ScopeId` and `span: Span` — phase 1
//! attaches a scope to every expression node, not just the ones that need a
//! lookup, so "every node has a non-null scope" holds uniformly rather than
//! only on the variants that happen to resolve a name.
//!
//! Nodes are `Box`-linked, not arena-addressed — nothing looks up an
//! expression by identity, unlike declarations and scopes (see `decl.rs`).

use crate::decl::ScopeId;
use crate::types::Type;
use juno_util::{Span, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// Unary `-`.
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqOp {
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    /// Unary `!`.
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Inc,
    Dec,
}

impl std::fmt::Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArithOp::Add => "+",
            ArithOp::Sub | ArithOp::Neg => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for EqOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EqOp::Eq => "==",
            EqOp::Ne => "!=",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
            LogicalOp::Not => "!",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for PostfixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PostfixOp::Inc => "++",
            PostfixOp::Dec => "--",
        };
        write!(f, "{s}")
    }
}

macro_rules! leaf_expr {
    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            $(pub $field: $ty,)*
            pub scope: ScopeId,
            pub span: Span,
        }
    };
}

leaf_expr!(IntConstExpr { value: i32 });
leaf_expr!(DoubleConstExpr { value: f64 });
leaf_expr!(BoolConstExpr { value: bool });
leaf_expr!(StringConstExpr { value: String });
leaf_expr!(NullConstExpr {});
/// The absent test/init/step of a `for`, or an empty `return`.
leaf_expr!(EmptyExpr {});
leaf_expr!(ThisExpr {});
leaf_expr!(ReadIntegerExpr {});
leaf_expr!(ReadLineExpr {});

#[derive(Debug, Clone)]
pub struct ArrayAccessExpr {
    pub base: Box<Expr>,
    pub subscript: Box<Expr>,
    pub scope: ScopeId,
    pub span: Span,
}

/// `b.f` or bare `f` (`base` is `None`).
#[derive(Debug, Clone)]
pub struct FieldAccessExpr {
    pub base: Option<Box<Expr>>,
    pub field: Symbol,
    pub scope: ScopeId,
    pub span: Span,
}

/// `b.f(args)`, bare `f(args)`, or `arr.length()`.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub base: Option<Box<Expr>>,
    pub method: Symbol,
    pub args: Vec<Expr>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NewExpr {
    pub class_name: Symbol,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NewArrayExpr {
    pub size: Box<Expr>,
    pub elem_type: Type,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PostfixExpr {
    pub op: PostfixOp,
    pub operand: Box<Expr>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ArithmeticExpr {
    pub op: ArithOp,
    pub left: Box<Expr>,
    /// Absent for the unary `-` form.
    pub right: Option<Box<Expr>>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct RelationalExpr {
    pub op: RelOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct EqualityExpr {
    pub op: EqOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LogicalExpr {
    pub op: LogicalOp,
    pub left: Box<Expr>,
    /// Absent for the unary `!` form.
    pub right: Option<Box<Expr>>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub scope: ScopeId,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Expr {
    IntConst(IntConstExpr),
    DoubleConst(DoubleConstExpr),
    BoolConst(BoolConstExpr),
    StringConst(StringConstExpr),
    NullConst(NullConstExpr),
    Empty(EmptyExpr),
    This(ThisExpr),
    ArrayAccess(ArrayAccessExpr),
    FieldAccess(FieldAccessExpr),
    Call(CallExpr),
    New(NewExpr),
    NewArray(NewArrayExpr),
    ReadInteger(ReadIntegerExpr),
    ReadLine(ReadLineExpr),
    Postfix(PostfixExpr),
    Arithmetic(ArithmeticExpr),
    Relational(RelationalExpr),
    Equality(EqualityExpr),
    Logical(LogicalExpr),
    Assign(AssignExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::IntConst(e) => e.span,
            Expr::DoubleConst(e) => e.span,
            Expr::BoolConst(e) => e.span,
            Expr::StringConst(e) => e.span,
            Expr::NullConst(e) => e.span,
            Expr::Empty(e) => e.span,
            Expr::This(e) => e.span,
            Expr::ArrayAccess(e) => e.span,
            Expr::FieldAccess(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::New(e) => e.span,
            Expr::NewArray(e) => e.span,
            Expr::ReadInteger(e) => e.span,
            Expr::ReadLine(e) => e.span,
            Expr::Postfix(e) => e.span,
            Expr::Arithmetic(e) => e.span,
            Expr::Relational(e) => e.span,
            Expr::Equality(e) => e.span,
            Expr::Logical(e) => e.span,
            Expr::Assign(e) => e.span,
        }
    }

    pub fn scope(&self) -> ScopeId {
        match self {
            Expr::IntConst(e) => e.scope,
            Expr::DoubleConst(e) => e.scope,
            Expr::BoolConst(e) => e.scope,
            Expr::StringConst(e) => e.scope,
            Expr::NullConst(e) => e.scope,
            Expr::Empty(e) => e.scope,
            Expr::This(e) => e.scope,
            Expr::ArrayAccess(e) => e.scope,
            Expr::FieldAccess(e) => e.scope,
            Expr::Call(e) => e.scope,
            Expr::New(e) => e.scope,
            Expr::NewArray(e) => e.scope,
            Expr::ReadInteger(e) => e.scope,
            Expr::ReadLine(e) => e.scope,
            Expr::Postfix(e) => e.scope,
            Expr::Arithmetic(e) => e.scope,
            Expr::Relational(e) => e.scope,
            Expr::Equality(e) => e.scope,
            Expr::Logical(e) => e.scope,
            Expr::Assign(e) => e.scope,
        }
    }
}
