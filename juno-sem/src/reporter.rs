//! The error-reporting sink: one method per diagnostic kind in the
//! catalogue, each building a message from exactly that kind's argument list
//! and emitting it through a [`Handler`].
//!
//! Built on the workspace's `DiagnosticBuilder`/`Handler` pair — this module
//! is the thin, catalogue-shaped layer on top of that general machinery,
//! building one `DiagnosticBuilder` per error kind rather than constructing
//! `Diagnostic` literals by hand.

use juno_ast::Type;
use juno_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Symbol};

/// What kind of name `IdentifierNotDeclared` was looking for — narrows the
/// message without needing a distinct diagnostic kind per case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupReason {
    Variable,
    Function,
    Class,
    Interface,
    Type,
}

impl std::fmt::Display for LookupReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LookupReason::Variable => "variable",
            LookupReason::Function => "function",
            LookupReason::Class => "class",
            LookupReason::Interface => "interface",
            LookupReason::Type => "type",
        };
        write!(f, "{s}")
    }
}

/// Wraps a [`Handler`], translating each catalogue row into a formatted
/// diagnostic. Holds no state of its own beyond the handler
/// reference, so checker code can construct one per call site cheaply.
pub struct Reporter<'a> {
    handler: &'a Handler,
}

impl<'a> Reporter<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self { handler }
    }

    pub fn decl_conflict(&self, name: Symbol, new_span: Span, prior_span: Span) {
        DiagnosticBuilder::error(format!("'{name}' is already declared in this scope"))
            .code(DiagnosticCode::DECL_CONFLICT)
            .span(new_span)
            .note(format!("previous declaration at {prior_span:?}"))
            .emit(self.handler);
    }

    pub fn override_mismatch(&self, member_name: Symbol, span: Span) {
        DiagnosticBuilder::error(format!("'{member_name}' does not match the signature it overrides"))
            .code(DiagnosticCode::OVERRIDE_MISMATCH)
            .span(span)
            .emit(self.handler);
    }

    pub fn interface_not_implemented(&self, class_name: Symbol, interface_name: Symbol, span: Span) {
        DiagnosticBuilder::error(format!(
            "class '{class_name}' does not implement interface '{interface_name}'"
        ))
        .code(DiagnosticCode::INTERFACE_NOT_IMPLEMENTED)
        .span(span)
        .emit(self.handler);
    }

    pub fn identifier_not_declared(&self, name: Symbol, reason: LookupReason, span: Span) {
        DiagnosticBuilder::error(format!("no {reason} named '{name}' was declared"))
            .code(DiagnosticCode::IDENTIFIER_NOT_DECLARED)
            .span(span)
            .emit(self.handler);
    }

    pub fn field_not_found_in_base(&self, name: Symbol, base_type: &Type, span: Span) {
        DiagnosticBuilder::error(format!("'{base_type}' has no member named '{name}'"))
            .code(DiagnosticCode::FIELD_NOT_FOUND_IN_BASE)
            .span(span)
            .emit(self.handler);
    }

    pub fn inaccessible_field(&self, name: Symbol, base_type: &Type, span: Span) {
        DiagnosticBuilder::error(format!("'{name}' of '{base_type}' is not accessible from here"))
            .code(DiagnosticCode::INACCESSIBLE_FIELD)
            .span(span)
            .emit(self.handler);
    }

    pub fn incompatible_operand(&self, op: &str, operand_type: &Type, span: Span) {
        DiagnosticBuilder::error(format!("'{op}' is incompatible with operand type '{operand_type}'"))
            .code(DiagnosticCode::INCOMPATIBLE_OPERAND)
            .span(span)
            .emit(self.handler);
    }

    pub fn incompatible_operands(&self, op: &str, left: &Type, right: &Type, span: Span) {
        DiagnosticBuilder::error(format!(
            "'{op}' is incompatible with operand types '{left}' and '{right}'"
        ))
        .code(DiagnosticCode::INCOMPATIBLE_OPERANDS)
        .span(span)
        .emit(self.handler);
    }

    pub fn test_not_boolean(&self, span: Span) {
        DiagnosticBuilder::error("test expression must have type 'bool'")
            .code(DiagnosticCode::TEST_NOT_BOOLEAN)
            .span(span)
            .emit(self.handler);
    }

    pub fn brackets_on_non_array(&self, base_type: &Type, span: Span) {
        DiagnosticBuilder::error(format!("'[]' applied to non-array type '{base_type}'"))
            .code(DiagnosticCode::BRACKETS_ON_NON_ARRAY)
            .span(span)
            .emit(self.handler);
    }

    pub fn subscript_not_integer(&self, span: Span) {
        DiagnosticBuilder::error("array subscript must have type 'int'")
            .code(DiagnosticCode::SUBSCRIPT_NOT_INTEGER)
            .span(span)
            .emit(self.handler);
    }

    pub fn new_array_size_not_integer(&self, span: Span) {
        DiagnosticBuilder::error("array size must have type 'int'")
            .code(DiagnosticCode::NEW_ARRAY_SIZE_NOT_INTEGER)
            .span(span)
            .emit(self.handler);
    }

    pub fn arg_mismatch(&self, index_1based: usize, given: &Type, expected: &Type, span: Span) {
        DiagnosticBuilder::error(format!(
            "argument {index_1based} has type '{given}', expected '{expected}'"
        ))
        .code(DiagnosticCode::ARG_MISMATCH)
        .span(span)
        .emit(self.handler);
    }

    pub fn num_args_mismatch(&self, fn_name: Symbol, expected: usize, given: usize, span: Span) {
        DiagnosticBuilder::error(format!(
            "function '{fn_name}' expects {expected} argument(s), got {given}"
        ))
        .code(DiagnosticCode::NUM_ARGS_MISMATCH)
        .span(span)
        .emit(self.handler);
    }

    pub fn print_arg_mismatch(&self, index_1based: usize, given: &Type, span: Span) {
        DiagnosticBuilder::error(format!(
            "Print argument {index_1based} has type '{given}', expected int, bool, or string"
        ))
        .code(DiagnosticCode::PRINT_ARG_MISMATCH)
        .span(span)
        .emit(self.handler);
    }

    pub fn return_mismatch(&self, given: &Type, expected: &Type, span: Span) {
        DiagnosticBuilder::error(format!("returned type '{given}' does not match declared return type '{expected}'"))
            .code(DiagnosticCode::RETURN_MISMATCH)
            .span(span)
            .emit(self.handler);
    }

    pub fn this_outside_class_scope(&self, span: Span) {
        DiagnosticBuilder::error("'this' used outside of a class")
            .code(DiagnosticCode::THIS_OUTSIDE_CLASS_SCOPE)
            .span(span)
            .emit(self.handler);
    }

    pub fn break_outside_loop(&self, span: Span) {
        DiagnosticBuilder::error("'break' used outside of a loop or switch")
            .code(DiagnosticCode::BREAK_OUTSIDE_LOOP)
            .span(span)
            .emit(self.handler);
    }

    /// A cyclic `extends` chain is reported through this rather than left to
    /// hang `ResolveMember`.
    pub fn inheritance_cycle(&self, class_name: Symbol, span: Span) {
        DiagnosticBuilder::error(format!("'{class_name}' inherits from itself"))
            .code(DiagnosticCode::INHERITANCE_CYCLE)
            .span(span)
            .emit(self.handler);
    }
}
