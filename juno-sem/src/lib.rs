//! Semantic analysis: phase 1 scope building, phase 2 type checking, and the
//! diagnostic catalogue that reports what phase 2 finds.

pub mod checker;
pub mod driver;
pub mod lookup;
pub mod reporter;
pub mod scope;
pub mod type_of;

pub use driver::{check_program, CheckResult};
pub use reporter::{LookupReason, Reporter};
