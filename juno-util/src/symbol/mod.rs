//! String interning for identifier handling.
//!
//! [`Symbol`] is a compact, `Copy` handle to an interned string: comparison
//! is an index comparison, and every occurrence of the same name in a
//! program (a class name used at the declaration and at every reference)
//! shares one allocation.
//!
//! ```
//! use juno_util::symbol::Symbol;
//!
//! let a = Symbol::intern("Pizza");
//! let b = Symbol::intern("Pizza");
//! assert_eq!(a, b);
//! ```

mod interner;

pub use interner::STRING_TABLE;

use std::fmt;

/// Snapshot of interner activity, useful for profiling large inputs.
#[derive(Clone, Copy, Debug, Default)]
pub struct InternerStats {
    pub count: usize,
    pub capacity: usize,
    pub collisions: usize,
    pub hits: usize,
    pub misses: usize,
}

impl InternerStats {
    pub const fn new(count: usize, capacity: usize, collisions: usize, hits: usize, misses: usize) -> Self {
        Self { count, capacity, collisions, hits, misses }
    }

    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 { 0.0 } else { self.count as f64 / self.capacity as f64 }
    }

    pub fn is_near_capacity(&self) -> bool {
        self.load_factor() > 0.75
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 { 0.0 } else { self.hits as f64 / total as f64 }
    }

    pub fn total_operations(&self) -> usize {
        self.hits + self.misses
    }
}

/// A handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub(crate) index: u32,
}

// Indices below this bound are pre-interned known identifiers (see
// `interner::StringTable::initialize_known_symbols`) and must stay in sync
// with the constants below.
const RESERVED_SYMBOLS_END: u32 = 64;

pub const KW_CLASS: Symbol = Symbol { index: 0 };
pub const KW_INTERFACE: Symbol = Symbol { index: 1 };
pub const KW_EXTENDS: Symbol = Symbol { index: 2 };
pub const KW_IMPLEMENTS: Symbol = Symbol { index: 3 };
pub const TY_VOID: Symbol = Symbol { index: 4 };
pub const TY_INT: Symbol = Symbol { index: 5 };
pub const TY_DOUBLE: Symbol = Symbol { index: 6 };
pub const TY_BOOL: Symbol = Symbol { index: 7 };
pub const TY_STRING: Symbol = Symbol { index: 8 };
pub const KW_NULL: Symbol = Symbol { index: 9 };
pub const KW_THIS: Symbol = Symbol { index: 10 };
pub const KW_NEW: Symbol = Symbol { index: 11 };
pub const KW_NEW_ARRAY: Symbol = Symbol { index: 12 };
pub const KW_PRINT: Symbol = Symbol { index: 13 };
pub const KW_READ_INTEGER: Symbol = Symbol { index: 14 };
pub const KW_READ_LINE: Symbol = Symbol { index: 15 };
pub const KW_RETURN: Symbol = Symbol { index: 16 };
pub const KW_BREAK: Symbol = Symbol { index: 17 };
pub const KW_IF: Symbol = Symbol { index: 18 };
pub const KW_ELSE: Symbol = Symbol { index: 19 };
pub const KW_WHILE: Symbol = Symbol { index: 20 };
pub const KW_FOR: Symbol = Symbol { index: 21 };
pub const KW_SWITCH: Symbol = Symbol { index: 22 };
pub const KW_CASE: Symbol = Symbol { index: 23 };
pub const KW_DEFAULT: Symbol = Symbol { index: 24 };
pub const KW_TRUE: Symbol = Symbol { index: 25 };
pub const KW_FALSE: Symbol = Symbol { index: 26 };
pub const ID_LENGTH: Symbol = Symbol { index: 27 };
pub const ID_MAIN: Symbol = Symbol { index: 28 };

impl Symbol {
    /// Intern `string`, returning its (possibly newly-assigned) symbol.
    #[inline]
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.intern(string)
    }

    /// The original string. O(n) in the interner's size — avoid in hot loops,
    /// prefer [`Symbol::eq_str`] for comparisons.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.get(*self).unwrap_or("")
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    #[inline]
    pub fn eq_str(&self, other: &str) -> bool {
        self.as_str() == other
    }

    /// Whether this is one of the pre-interned keywords/known identifiers.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.index < RESERVED_SYMBOLS_END
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    pub fn stats() -> InternerStats {
        STRING_TABLE.stats()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static_assertions::assert_impl_all!(Symbol: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let a = Symbol::intern("Pizza");
        let b = Symbol::intern("Pizza");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_get_different_symbols() {
        assert_ne!(Symbol::intern("Pizza"), Symbol::intern("Salad"));
    }

    #[test]
    fn as_str_roundtrips() {
        assert_eq!(Symbol::intern("counter").as_str(), "counter");
    }

    #[test]
    fn known_keywords_are_known() {
        assert!(KW_CLASS.is_known());
        assert!(KW_EXTENDS.is_known());
        assert!(TY_INT.is_known());
        assert!(ID_LENGTH.is_known());
    }

    #[test]
    fn fresh_identifiers_are_not_known() {
        assert!(!Symbol::intern("myCustomClassName").is_known());
    }

    #[test]
    fn eq_str_matches_as_str() {
        let s = Symbol::intern("hello");
        assert!(s.eq_str("hello"));
        assert!(!s.eq_str("goodbye"));
    }

    #[test]
    fn display_prints_original_string() {
        let s = Symbol::intern("Board");
        assert_eq!(format!("{s}"), "Board");
    }

    #[test]
    fn keyword_constants_spell_their_keyword() {
        assert_eq!(KW_CLASS.as_str(), "class");
        assert_eq!(KW_INTERFACE.as_str(), "interface");
        assert_eq!(KW_NEW_ARRAY.as_str(), "NewArray");
        assert_eq!(ID_MAIN.as_str(), "main");
    }

    #[test]
    fn concurrent_interning_is_consistent() {
        use std::thread;
        let handles: Vec<_> =
            (0..8).map(|i| thread::spawn(move || Symbol::intern(&format!("concurrent_{i}")))).collect();
        let symbols: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (i, s) in symbols.iter().enumerate() {
            assert_eq!(s.as_str(), format!("concurrent_{i}"));
        }
    }
}
