//! `check_program`: the single entry point wiring phase 1
//! (`scope::build_scopes`) into phase 2 (`checker::check`) over a shared
//! [`Handler`].

use juno_ast::Program;
use juno_util::Handler;

use crate::checker;
use crate::reporter::Reporter;
use crate::scope;

/// What a single compilation run produced: a diagnostic count and whether
/// any of them were errors, mirroring how a `SemanticAnalyzer` summarizes a
/// run. Callers that want the diagnostics themselves should drive
/// `scope::build_scopes`/`checker::check` directly over their own `Handler`.
#[derive(Debug, Clone, Copy)]
pub struct CheckResult {
    pub diagnostic_count: usize,
    pub has_errors: bool,
}

/// Runs both phases over `program`, mutating its scope tables in place
/// (phase 1) and reporting every diagnostic phase 2 produces.
pub fn check_program(program: &mut Program) -> CheckResult {
    let handler = Handler::new();
    let reporter = Reporter::new(&handler);
    scope::build_scopes(program, &reporter);
    checker::check(program, &reporter);
    CheckResult { diagnostic_count: handler.error_count(), has_errors: handler.has_errors() }
}
