//! Registry of item catalogs keyed by item type.
//!
//! Consumers ask for "the catalog of `T`" without knowing where it was loaded
//! from. At most one catalog is registered per item type; registering again
//! replaces the previous one. The service is an ordinary value: the host
//! decides how widely to share it.

use crate::error::{CatalogError, Result};
use crate::items::{CatalogItem, ItemCatalog};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
struct Registration {
    item_type: &'static str,
    catalog: Arc<dyn Any + Send + Sync>,
}

#[derive(Clone, Default)]
pub struct CatalogService {
    catalogs: HashMap<TypeId, Registration>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `catalog` as the catalog for `T`, returning the one it replaced.
    pub fn register<T>(&mut self, catalog: Arc<ItemCatalog<T>>) -> Option<Arc<ItemCatalog<T>>>
    where
        T: CatalogItem + Send + Sync + 'static,
    {
        let previous = self.catalogs.insert(
            TypeId::of::<T>(),
            Registration {
                item_type: type_name::<T>(),
                catalog,
            },
        )?;
        debug!(
            item_type = previous.item_type,
            "replacing registered item catalog"
        );
        previous.catalog.downcast::<ItemCatalog<T>>().ok()
    }

    /// Drop the catalog registered for `T`.
    pub fn unregister<T: 'static>(&mut self) -> bool {
        self.catalogs.remove(&TypeId::of::<T>()).is_some()
    }

    pub fn try_get<T>(&self) -> Option<Arc<ItemCatalog<T>>>
    where
        T: CatalogItem + Send + Sync + 'static,
    {
        let registration = self.catalogs.get(&TypeId::of::<T>())?;
        registration
            .catalog
            .clone()
            .downcast::<ItemCatalog<T>>()
            .ok()
    }

    /// The catalog for `T`, or [`CatalogError::NotRegistered`].
    pub fn get<T>(&self) -> Result<Arc<ItemCatalog<T>>>
    where
        T: CatalogItem + Send + Sync + 'static,
    {
        self.try_get::<T>()
            .ok_or_else(|| CatalogError::NotRegistered {
                item_type: type_name::<T>(),
            })
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.catalogs.contains_key(&TypeId::of::<T>())
    }

    /// Registered item type names, unordered.
    pub fn item_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalogs.values().map(|registration| registration.item_type)
    }

    pub fn clear(&mut self) {
        self.catalogs.clear();
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.item_types()).finish()
    }
}
