//! Ambient infrastructure shared by the AST and semantic-analysis crates:
//! string interning, typed indexed arenas, source spans, and diagnostics.
//!
//! None of this is specific to the Java-like language being checked — it is
//! the same kind of scaffolding any compiler-shaped crate needs, independent
//! of the language it compiles.

mod index_vec;
pub mod diagnostic;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;

pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
