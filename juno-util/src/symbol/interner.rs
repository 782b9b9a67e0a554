//! Thread-safe string interner backing [`super::Symbol`].
//!
//! Concurrent access isn't exercised by this single-threaded semantic pass,
//! but the interner is built the same way the rest of this corpus builds
//! one: lock-free via `DashMap`, with strings leaked to `'static` since they
//! live for the whole run and are never freed.

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::LazyLock;

use super::{InternerStats, Symbol};

pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known_symbols();
    table
});

/// Number of symbol slots reserved for pre-interned keywords/known names.
const RESERVED_SYMBOLS_END: u32 = 64;

pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
    collisions: AtomicUsize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(64),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
            collisions: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Pre-interns every keyword/known identifier so their indices match the
    /// `KW_*`/`ID_*` constants in `symbol::mod` regardless of interning order.
    fn initialize_known_symbols(&self) {
        let known_symbols = [
            "class", "interface", "extends", "implements", "void", "int", "double", "bool",
            "string", "null", "this", "new", "NewArray", "Print", "ReadInteger", "ReadLine",
            "return", "break", "if", "else", "while", "for", "switch", "case", "default",
            "true", "false", "length", "main",
        ];
        for s in known_symbols {
            self.intern(s);
        }
    }

    pub fn intern(&self, string: &str) -> Symbol {
        let hash = Self::hash_string(string);
        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == string {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Symbol { index: entry.value().1 };
            }
            self.collisions.fetch_add(1, Ordering::Relaxed);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        self.map.insert(hash, (leaked, index));
        Symbol { index }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.map.iter().find(|entry| entry.value().1 == symbol.index).map(|entry| entry.value().0)
    }

    pub fn stats(&self) -> InternerStats {
        InternerStats::new(
            self.map.len(),
            self.map.capacity(),
            self.collisions.load(Ordering::Relaxed),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    #[cfg(test)]
    pub fn reset_stats(&self) {
        self.collisions.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn hash_string(string: &str) -> u64 {
        let mut hasher = AHasher::default();
        string.hash(&mut hasher);
        hasher.finish()
    }
}

static_assertions::assert_impl_all!(StringTable: Send, Sync);
