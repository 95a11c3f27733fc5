//! A bijective, ordered key/value table.
//!
//! Used by [`crate::Vessel`] to bind species names to their tokens: both
//! directions are unique, and both directions are only ever extended, never
//! rebound.

use bimap::BiBTreeMap;
use thiserror::Error;

/// Failure modes of [`SymbolTable`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolTableError {
    /// The key passed to [`SymbolTable::store`] is already bound to some value.
    #[error("key is already registered")]
    DuplicateKey,
    /// The value passed to [`SymbolTable::store`] is already bound to some key.
    #[error("value is already registered")]
    DuplicateValue,
    /// Neither [`SymbolTable::lookup`] nor [`SymbolTable::lookup_by_value`] found an entry.
    #[error("symbol not found")]
    NotFound,
}

/// A bijective associative table: keys are unique, values are unique, and
/// `entries()` is always produced in ascending-key order.
///
/// `crn`'s [`bimap::BiBTreeMap`] almost fits this directly, except that its
/// `insert` *overwrites* a colliding key or value instead of rejecting it; we
/// wrap it and perform both duplicate checks before ever mutating the
/// underlying map, so `store` either fully succeeds or leaves the table
/// untouched.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable<K, V> {
    pairs: BiBTreeMap<K, V>,
}

impl<K, V> SymbolTable<K, V>
where
    K: Ord + Clone,
    V: Ord + Clone,
{
    /// An empty table.
    pub fn new() -> Self {
        Self {
            pairs: BiBTreeMap::new(),
        }
    }

    /// Binds `k` to `v`. Fails without mutating the table if `k` or `v` is
    /// already bound to anything.
    pub fn store(&mut self, k: K, v: V) -> Result<(), SymbolTableError> {
        if self.pairs.contains_left(&k) {
            return Err(SymbolTableError::DuplicateKey);
        }
        if self.pairs.contains_right(&v) {
            return Err(SymbolTableError::DuplicateValue);
        }
        self.pairs.insert(k, v);
        Ok(())
    }

    /// Looks up the value bound to `k`.
    pub fn lookup(&self, k: &K) -> Result<&V, SymbolTableError> {
        self.pairs.get_by_left(k).ok_or(SymbolTableError::NotFound)
    }

    /// Looks up the key bound to `v`.
    pub fn lookup_by_value(&self, v: &V) -> Result<&K, SymbolTableError> {
        self.pairs.get_by_right(v).ok_or(SymbolTableError::NotFound)
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` if no pairs are stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All stored pairs, in ascending-key order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.pairs.iter()
    }
}
