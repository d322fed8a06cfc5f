//! Interning of symbol names.
//!
//! Symbols are compared by a small integer id instead of by name. A [`SymbolTable`] hands out one
//! id per distinct name, so two symbols built from the same table and name always share an id,
//! and checking them for equality is a single integer comparison.
//!
//! Ids are drawn from a process-wide counter, so symbols from two different tables never share an
//! id, even if they have the same name. Most code uses the [global table](SymbolTable::global);
//! tests and embedders that want isolation can create their own.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::{
        atomic::{AtomicU32, Ordering as AtomicOrdering},
        Arc,
    },
};

/// The next id to hand out, shared by every table.
static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// The process-wide symbol table.
static GLOBAL: Lazy<Arc<SymbolTable>> = Lazy::new(|| Arc::new(SymbolTable::new()));

/// A unique identifier for an interned symbol name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    /// Returns the raw id.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// An interned symbol, such as `x` or `theta`.
///
/// Equality and hashing use the id only. Ordering is by name, then id, so sorting is
/// deterministic and independent of the order in which names were interned.
#[derive(Debug, Clone)]
pub struct Symbol {
    id: SymbolId,
    name: Arc<str>,
}

impl Symbol {
    /// Returns the id of the symbol.
    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// Returns the name of the symbol.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.id == other.id {
            return Ordering::Equal;
        }
        self.name.cmp(&other.name).then(self.id.cmp(&other.id))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A registry mapping symbol names to ids.
///
/// Lookups of already registered names only take a shared lock. Registering a new name takes the
/// exclusive lock and checks again, in case another thread registered it in the meantime. Names
/// are never evicted.
#[derive(Debug, Default)]
pub struct SymbolTable {
    ids: RwLock<FxHashMap<Arc<str>, SymbolId>>,
}

impl SymbolTable {
    /// Creates a new, empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide symbol table.
    pub fn global() -> &'static Arc<SymbolTable> {
        &GLOBAL
    }

    /// Returns the symbol with the given name, registering the name if this table has not seen it
    /// before.
    pub fn intern(&self, name: &str) -> Symbol {
        {
            let ids = self.ids.read();
            if let Some((name, &id)) = ids.get_key_value(name) {
                return Symbol { id, name: Arc::clone(name) };
            }
        }

        let mut ids = self.ids.write();
        if let Some((name, &id)) = ids.get_key_value(name) {
            return Symbol { id, name: Arc::clone(name) };
        }

        let id = SymbolId(NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed));
        let name: Arc<str> = Arc::from(name);
        ids.insert(Arc::clone(&name), id);
        tracing::debug!(name = &*name, id = id.0, "registered symbol");
        Symbol { id, name }
    }

    /// Returns the id of the given name, if it has been registered.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.ids.read().get(name).copied()
    }

    /// Returns the number of registered names.
    pub fn len(&self) -> usize {
        self.ids.read().len()
    }

    /// Returns true if no names have been registered.
    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_id() {
        let table = SymbolTable::new();
        let a = table.intern("x");
        let b = table.intern("x");
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn different_names_different_ids() {
        let table = SymbolTable::new();
        let x = table.intern("x");
        let y = table.intern("y");
        assert_ne!(x, y);
        assert_eq!(table.lookup("y"), Some(y.id()));
        assert_eq!(table.lookup("z"), None);
    }

    #[test]
    fn tables_are_isolated() {
        let first = SymbolTable::new();
        let second = SymbolTable::new();
        let a = first.intern("x");
        let b = second.intern("x");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert!(second.lookup("y").is_none());
    }

    #[test]
    fn order_by_name() {
        let table = SymbolTable::new();
        let b = table.intern("b");
        let a = table.intern("a");
        assert!(a < b);
    }

    #[test]
    fn concurrent_interning() {
        let table = Arc::new(SymbolTable::new());
        let handles = (0..8)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    ["x", "y", "z"].map(|name| table.intern(name).id())
                })
            })
            .collect::<Vec<_>>();

        let ids = handles.into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(table.len(), 3);
    }
}
