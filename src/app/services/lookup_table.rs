//! Concurrently readable key/value tables populated by refreshes
//!
//! One table backs each dataset map. The mapper that writes it and the
//! service that reads it share it through an `Arc`. Readers contend with a
//! single upsert at a time, never with a whole refresh, so a lookup during a
//! refresh sees either the previous or the new value of an entry.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Key/value map with upsert semantics and cloned reads
#[derive(Debug)]
pub struct LookupTable<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> LookupTable<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the value for `key`; the last write wins
    pub fn put(&self, key: K, value: V) {
        self.write().insert(key, value);
    }

    /// Current value for `key`, if any
    pub fn get(&self, key: &K) -> Option<V> {
        self.read().get(key).cloned()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of every entry, for scans that must not hold the lock
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        K: Clone,
    {
        self.read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    // A writer can only panic between whole inserts, so a poisoned map is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K, V> Default for LookupTable<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
