//! The catalog: ordered entries plus a lazily rebuilt key index.
//!
//! `entries` is the source of truth. Every structural mutation drops the
//! cached [`KeyIndex`]; the next read rebuilds it by grouping entries by key.
//! Reads between mutations are map lookups.
//!
//! Duplicate keys across entries are merged on read. Mutations that target a
//! single entry (`add_value`, `remove_value`, `remove_key`) act on the first
//! entry whose key is equal; `set_values` clears all of them.

use crate::catalog::{CatalogEntry, CatalogLookup, Key, KeyIndex, ObjectEntry};
use crate::object::{Object, ObjectRef, SharedObject};
use crate::resolver::{ObjectGraph, Resolver, SearchStrategy};
use crate::types::TypeRegistry;
use std::sync::OnceLock;

#[derive(Debug, Default)]
/// Typed key → multi-value registry over non-owned objects.
pub struct Catalog {
    entries: Vec<Box<dyn CatalogEntry>>,
    index: OnceLock<KeyIndex>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap entries that were authored or deserialized elsewhere.
    pub fn from_entries(entries: Vec<Box<dyn CatalogEntry>>) -> Self {
        Self {
            entries,
            index: OnceLock::new(),
        }
    }

    pub fn entries(&self) -> &[Box<dyn CatalogEntry>] {
        &self.entries
    }

    /// Direct access for authoring tools. The index is invalidated up front.
    pub fn entries_mut(&mut self) -> &mut Vec<Box<dyn CatalogEntry>> {
        self.invalidate();
        &mut self.entries
    }

    pub fn push_entry(&mut self, entry: Box<dyn CatalogEntry>) {
        self.entries.push(entry);
        self.invalidate();
    }

    /// Force the next read to rebuild the index.
    pub fn invalidate(&mut self) {
        self.index.take();
    }

    /// The current index, rebuilt first if a mutation happened since the last read.
    pub fn index(&self) -> &KeyIndex {
        self.index.get_or_init(|| KeyIndex::build(&self.entries))
    }

    /// Live values stored under `key`, null references skipped.
    pub fn get_values<'a>(&'a self, key: &Key) -> impl Iterator<Item = SharedObject> + use<'a> {
        self.index()
            .values(key)
            .unwrap_or_default()
            .iter()
            .filter_map(ObjectRef::get)
    }

    pub fn get_first_value(&self, key: &Key) -> Option<SharedObject> {
        self.get_values(key).next()
    }

    pub fn has_values(&self, key: &Key) -> bool {
        self.get_values(key).next().is_some()
    }

    /// Keys holding at least one live value, in first-seen order.
    pub fn keys_with_values(&self) -> impl Iterator<Item = &Key> {
        self.index()
            .iter()
            .filter(|(_, values)| values.iter().any(|value| !value.is_null()))
            .map(|(key, _)| key)
    }

    /// Live values across every entry. Walks all entries on each call.
    pub fn total_value_count(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|entry| entry.values())
            .filter(|value| !value.is_null())
            .count()
    }

    pub fn value_count(&self, key: &Key) -> usize {
        self.get_values(key).count()
    }

    /// Append `value` under `key`. Null references are ignored.
    pub fn add_value(&mut self, key: &Key, value: impl Into<ObjectRef>) {
        let value = value.into();
        if value.is_null() {
            return;
        }
        match self.position(key) {
            Some(index) => self.entries[index].push(value),
            None => self
                .entries
                .push(Box::new(ObjectEntry::with_values(key.clone(), [value]))),
        }
        self.invalidate();
    }

    /// Remove one occurrence of `value` under `key`, dropping the entry once
    /// it is empty.
    pub fn remove_value(&mut self, key: &Key, value: impl Into<ObjectRef>) -> bool {
        let value = value.into();
        let Some(index) = self.position(key) else {
            return false;
        };
        if !self.entries[index].remove(&value) {
            return false;
        }
        if self.entries[index].is_empty() {
            self.entries.remove(index);
        }
        self.invalidate();
        true
    }

    /// Remove the entry for `key` with all of its values.
    pub fn remove_key(&mut self, key: &Key) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    /// Replace everything stored under `key` with the non-null `values`.
    pub fn set_values<I>(&mut self, key: &Key, values: I)
    where
        I: IntoIterator,
        I::Item: Into<ObjectRef>,
    {
        self.entries.retain(|entry| entry.key() != key);
        let values: Vec<ObjectRef> = values
            .into_iter()
            .map(Into::into)
            .filter(|value| !value.is_null())
            .collect();
        if !values.is_empty() {
            self.entries
                .push(Box::new(ObjectEntry::with_values(key.clone(), values)));
        }
        self.invalidate();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.invalidate();
    }

    /// Store `value` under `key`, converting it through `resolver` when it
    /// does not satisfy the key's declared type. Returns whether anything
    /// was stored.
    pub fn add_converted<G: ObjectGraph + ?Sized>(
        &mut self,
        key: &Key,
        value: &ObjectRef,
        resolver: &Resolver<'_, G>,
        strategy: SearchStrategy,
        types: &TypeRegistry,
    ) -> bool {
        let target = key.associated_type(types);
        match resolver.convert(value, Some(&target), strategy) {
            Some(converted) => {
                self.add_value(key, &converted);
                true
            }
            None => false,
        }
    }

    /// Typed view over the values stored under `key`.
    pub fn lookup<T: Object>(&self, key: &Key) -> CatalogLookup<'_, T> {
        CatalogLookup::new(self, key.clone())
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }
}
