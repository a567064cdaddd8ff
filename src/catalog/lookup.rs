//! Typed read view over one catalog key.

use crate::catalog::{Catalog, Key};
use crate::object::{Object, downcast_shared};
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed read view of one key in a catalog.
///
/// Consumers that expect a concrete Rust type under a key use this instead of
/// downcasting by hand. Values of other types are skipped, not reported.
pub struct CatalogLookup<'c, T: Object> {
    catalog: &'c Catalog,
    key: Key,
    ty: PhantomData<fn() -> T>,
}

impl<'c, T: Object> CatalogLookup<'c, T> {
    pub fn new(catalog: &'c Catalog, key: Key) -> Self {
        Self {
            catalog,
            key,
            ty: PhantomData,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The first stored value, if it is a `T`.
    pub fn value(&self) -> Option<Arc<T>> {
        self.catalog
            .get_first_value(&self.key)
            .and_then(downcast_shared::<T>)
    }

    /// Every stored value that is a `T`, in order.
    pub fn values(&self) -> impl Iterator<Item = Arc<T>> + use<'c, T> {
        self.catalog
            .get_values(&self.key)
            .filter_map(downcast_shared::<T>)
    }

    /// True when more than one live value is stored, whatever its type.
    pub fn has_multiple_values(&self) -> bool {
        self.catalog.get_values(&self.key).nth(1).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;
    use crate::types::{TypeHandle, TypeRegistry};

    #[derive(Debug)]
    struct Waypoint {
        ty: TypeHandle,
        order: u32,
    }

    impl Object for Waypoint {
        fn object_type(&self) -> &TypeHandle {
            &self.ty
        }

        fn name(&self) -> &str {
            "waypoint"
        }
    }

    #[test]
    fn typed_view_skips_other_types() {
        let types = TypeRegistry::with_builtins();
        let marker = SceneObject::new("marker", types.object());
        let first = Arc::new(Waypoint {
            ty: types.object().clone(),
            order: 1,
        });
        let second = Arc::new(Waypoint {
            ty: types.object().clone(),
            order: 2,
        });
        let key = Key::untyped("route");
        let mut catalog = Catalog::new();
        catalog.add_value(&key, &marker);
        catalog.add_value(&key, &first);
        catalog.add_value(&key, &second);

        let route = catalog.lookup::<Waypoint>(&key);
        // first stored value is not a Waypoint
        assert!(route.value().is_none());
        let orders: Vec<u32> = route.values().map(|w| w.order).collect();
        assert_eq!(orders, [1, 2]);
        assert!(route.has_multiple_values());

        let markers = catalog.lookup::<SceneObject>(&key);
        assert_eq!(markers.value().map(|m| m.name().to_string()), Some("marker".into()));
    }
}
