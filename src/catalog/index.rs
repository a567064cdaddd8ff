//! Derived key → values view of a catalog's entries.
//!
//! The index is never persisted; [`crate::Catalog`] rebuilds it from scratch
//! after any structural mutation. Entries sharing an equal key are merged:
//! the index holds the concatenation of their values in entry order.

use crate::catalog::{CatalogEntry, Key};
use crate::object::ObjectRef;
use indexmap::IndexMap;
use tracing::trace;

#[derive(Debug, Default)]
/// Grouping of entry values by key, in first-seen key order.
pub struct KeyIndex {
    by_key: IndexMap<Key, Vec<ObjectRef>>,
}

impl KeyIndex {
    /// Group `entries` by key. Cost is linear in entries plus values.
    pub fn build(entries: &[Box<dyn CatalogEntry>]) -> Self {
        let mut by_key: IndexMap<Key, Vec<ObjectRef>> = IndexMap::with_capacity(entries.len());
        let mut merged = 0usize;
        for entry in entries {
            if let Some(slot) = by_key.get_mut(entry.key()) {
                merged += 1;
                slot.extend(entry.values().cloned());
            } else {
                by_key.insert(entry.key().clone(), entry.values().cloned().collect());
            }
        }
        trace!(
            entries = entries.len(),
            keys = by_key.len(),
            merged,
            "rebuilt catalog index"
        );
        Self { by_key }
    }

    /// Stored values for `key`, null references included.
    pub fn values(&self, key: &Key) -> Option<&[ObjectRef]> {
        self.by_key.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.by_key.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &[ObjectRef])> {
        self.by_key.iter().map(|(key, values)| (key, values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
