//! Identifier-keyed catalogs of authored items.
//!
//! Simpler than [`crate::Catalog`]: one item per string id, looked up through
//! a table built on first use. Building the table is strict about authoring
//! mistakes (empty slots, blank ids, duplicate ids) so a malformed catalog
//! fails loudly instead of answering lookups wrongly.

use crate::error::{CatalogError, Result};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Contract for items stored in an [`ItemCatalog`].
pub trait CatalogItem {
    /// Unique identifier within the catalog.
    fn id(&self) -> &str;

    /// Friendly name for tooling; the id unless overridden.
    fn display_name(&self) -> &str {
        self.id()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
/// Minimal item: an id and an optional display name.
pub struct BasicItem {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

impl CatalogItem for BasicItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        let trimmed = self.display_name.trim();
        if trimmed.is_empty() { self.id.trim() } else { trimmed }
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ItemCatalogDocument<T> {
    #[serde(default)]
    name: Option<String>,
    items: Vec<Option<T>>,
}

type Lookup = std::result::Result<HashMap<String, usize>, CatalogError>;

/// Named list of items with a lazily built id → item table.
#[derive(Debug)]
pub struct ItemCatalog<T> {
    name: String,
    items: Vec<Option<T>>,
    lookup: OnceLock<Lookup>,
}

impl<T: CatalogItem> ItemCatalog<T> {
    /// `None` slots model unassigned items and fail the lookup build.
    pub fn new(name: impl Into<String>, items: Vec<Option<T>>) -> Self {
        Self {
            name: name.into(),
            items,
            lookup: OnceLock::new(),
        }
    }

    pub fn from_items(name: impl Into<String>, items: impl IntoIterator<Item = T>) -> Self {
        Self::new(name, items.into_iter().map(Some).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every slot, unassigned ones included.
    pub fn items(&self) -> &[Option<T>] {
        &self.items
    }

    /// Rebuild the lookup table now, reporting any authoring error.
    pub fn refresh_lookup(&mut self) -> Result<()> {
        let lookup = self.build_lookup();
        let outcome = lookup.as_ref().map(|_| ()).map_err(Clone::clone);
        self.lookup = OnceLock::from(lookup);
        outcome
    }

    /// Look up an item; `Ok(None)` when the id is absent.
    pub fn try_get(&self, id: &str) -> Result<Option<&T>> {
        let lookup = self
            .lookup
            .get_or_init(|| self.build_lookup())
            .as_ref()
            .map_err(Clone::clone)?;
        Ok(lookup
            .get(id)
            .and_then(|&index| self.items.get(index))
            .and_then(Option::as_ref))
    }

    /// Look up an item that must exist.
    pub fn get(&self, id: &str) -> Result<&T> {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptyIdentifier {
                catalog: self.name.clone(),
            });
        }
        self.try_get(id)?.ok_or_else(|| CatalogError::ItemNotFound {
            catalog: self.name.clone(),
            id: id.to_string(),
        })
    }

    fn build_lookup(&self) -> Lookup {
        let mut lookup = HashMap::with_capacity(self.items.len());
        for (index, slot) in self.items.iter().enumerate() {
            let item = slot.as_ref().ok_or_else(|| CatalogError::UnassignedItem {
                catalog: self.name.clone(),
                index,
            })?;
            let id = item.id().trim();
            if id.is_empty() {
                return Err(CatalogError::MissingIdentifier {
                    catalog: self.name.clone(),
                    index,
                });
            }
            if lookup.insert(id.to_string(), index).is_some() {
                return Err(CatalogError::DuplicateIdentifier {
                    catalog: self.name.clone(),
                    id: id.to_string(),
                });
            }
        }
        Ok(lookup)
    }
}

impl<T: CatalogItem + DeserializeOwned> ItemCatalog<T> {
    /// Read an item catalog document (`{"name": ..., "items": [...]}`) and
    /// build its lookup table.
    ///
    /// The catalog name defaults to the file stem.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let document: ItemCatalogDocument<T> =
            serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        let name = document.name.unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let mut catalog = Self::new(name, document.items);
        catalog
            .refresh_lookup()
            .with_context(|| format!("indexing {}", path.display()))?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> BasicItem {
        BasicItem {
            id: id.to_string(),
            display_name: String::new(),
        }
    }

    #[test]
    fn lookups_use_trimmed_ids() {
        let catalog = ItemCatalog::from_items("weapons", [item(" sword "), item("bow")]);
        assert_eq!(catalog.get("sword").unwrap().id, " sword ");
        assert_eq!(catalog.get("sword").unwrap().display_name(), "sword");
        assert!(catalog.try_get("axe").unwrap().is_none());
    }

    #[test]
    fn get_rejects_blank_and_unknown_ids() {
        let catalog = ItemCatalog::from_items("weapons", [item("bow")]);
        assert_eq!(
            catalog.get("  "),
            Err(CatalogError::EmptyIdentifier {
                catalog: "weapons".into()
            })
        );
        assert_eq!(
            catalog.get("axe"),
            Err(CatalogError::ItemNotFound {
                catalog: "weapons".into(),
                id: "axe".into()
            })
        );
    }

    #[test]
    fn malformed_catalogs_fail_loudly() {
        let mut duplicate = ItemCatalog::from_items("dup", [item("bow"), item(" bow")]);
        assert_eq!(
            duplicate.refresh_lookup(),
            Err(CatalogError::DuplicateIdentifier {
                catalog: "dup".into(),
                id: "bow".into()
            })
        );
        assert!(duplicate.try_get("bow").is_err());

        let missing = ItemCatalog::from_items("missing", [item("bow"), item(" ")]);
        assert!(matches!(
            missing.try_get("bow"),
            Err(CatalogError::MissingIdentifier { index: 1, .. })
        ));

        let unassigned = ItemCatalog::new("holes", vec![Some(item("bow")), None]);
        assert!(matches!(
            unassigned.get("bow"),
            Err(CatalogError::UnassignedItem { index: 1, .. })
        ));
    }
}
