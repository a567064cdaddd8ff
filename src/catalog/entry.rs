//! Storage units binding one key to its values.
//!
//! Every entry exposes the same contract through [`CatalogEntry`]; the value
//! kinds differ only in their declared type, so they are one generic
//! [`Entry`] parameterized by a [`ValueKind`] marker plus a set of aliases.
//! Insertion does not enforce the declared type; [`CatalogEntry::valid_values`]
//! filters on read instead.

use crate::catalog::Key;
use crate::object::{Object, ObjectRef, SharedObject, downcast_shared};
use crate::types::{TypeHandle, TypeRegistry, builtin};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Uniform entry contract consumed by [`crate::Catalog`] and tooling.
pub trait CatalogEntry: fmt::Debug + Send + Sync {
    fn key(&self) -> &Key;

    fn set_key(&mut self, key: Key);

    /// Static declared value type of this entry kind.
    fn associated_type(&self, types: &TypeRegistry) -> TypeHandle;

    /// Stored values in insertion order, null references included.
    fn values(&self) -> Box<dyn Iterator<Item = &ObjectRef> + '_>;

    fn push(&mut self, value: ObjectRef);

    /// Remove the first stored occurrence of `value`.
    fn remove(&mut self, value: &ObjectRef) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live values, skipping null references.
    fn live_values(&self) -> Box<dyn Iterator<Item = SharedObject> + '_> {
        Box::new(self.values().filter_map(ObjectRef::get))
    }

    /// Live values assignable to the key's declared type.
    fn valid_values(&self, types: &TypeRegistry) -> Vec<SharedObject> {
        let target = self.key().associated_type(types);
        if target.is_universal() {
            return self.live_values().collect();
        }
        self.live_values()
            .filter(|value| target.is_assignable_from(value.object_type()))
            .collect()
    }
}

/// Marker naming the declared value type of an [`Entry`].
pub trait ValueKind: fmt::Debug + Send + Sync + 'static {
    const TYPE_NAME: &'static str;
}

macro_rules! value_kinds {
    ($($(#[$meta:meta])* $kind:ident => $type_name:path, $alias:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $kind;

            impl ValueKind for $kind {
                const TYPE_NAME: &'static str = $type_name;
            }

            pub type $alias = Entry<$kind>;
        )*
    };
}

value_kinds! {
    /// Any object; the kind used for entries created by catalog mutations.
    AnyObject => builtin::OBJECT, ObjectEntry;
    NodeValue => builtin::NODE, NodeEntry;
    CapabilityValue => builtin::CAPABILITY, CapabilityEntry;
    AssetValue => builtin::ASSET, AssetEntry;
    MeshValue => builtin::MESH, MeshEntry;
    TextureValue => builtin::TEXTURE, TextureEntry;
    SpriteValue => builtin::SPRITE, SpriteEntry;
    MaterialValue => builtin::MATERIAL, MaterialEntry;
    RigidbodyValue => builtin::RIGIDBODY, RigidbodyEntry;
    MeshRendererValue => builtin::MESH_RENDERER, MeshRendererEntry;
}

#[derive(Clone, Debug)]
/// One key and an ordered list of values of kind `V`.
pub struct Entry<V: ValueKind = AnyObject> {
    key: Key,
    values: Vec<ObjectRef>,
    kind: PhantomData<fn() -> V>,
}

impl<V: ValueKind> Entry<V> {
    pub fn new(key: Key) -> Self {
        Self::with_values(key, std::iter::empty::<ObjectRef>())
    }

    pub fn with_values<I>(key: Key, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ObjectRef>,
    {
        Self {
            key,
            values: values.into_iter().map(Into::into).collect(),
            kind: PhantomData,
        }
    }

    /// Live values that are instances of the concrete Rust type `T`.
    pub fn values_as<T: Object>(&self) -> impl Iterator<Item = Arc<T>> + '_ {
        self.values
            .iter()
            .filter_map(ObjectRef::get)
            .filter_map(downcast_shared::<T>)
    }
}

impl<V: ValueKind> CatalogEntry for Entry<V> {
    fn key(&self) -> &Key {
        &self.key
    }

    fn set_key(&mut self, key: Key) {
        self.key = key;
    }

    fn associated_type(&self, types: &TypeRegistry) -> TypeHandle {
        types.resolve(V::TYPE_NAME)
    }

    fn values(&self) -> Box<dyn Iterator<Item = &ObjectRef> + '_> {
        Box::new(self.values.iter())
    }

    fn push(&mut self, value: ObjectRef) {
        self.values.push(value);
    }

    fn remove(&mut self, value: &ObjectRef) -> bool {
        match self.values.iter().position(|stored| stored == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;

    #[test]
    fn aliases_report_their_declared_type() {
        let types = TypeRegistry::with_builtins();
        let key = Key::untyped("anything");
        assert!(ObjectEntry::new(key.clone()).associated_type(&types).is_universal());
        assert_eq!(
            NodeEntry::new(key.clone()).associated_type(&types).name(),
            builtin::NODE
        );
        assert_eq!(
            MeshRendererEntry::new(key).associated_type(&types).name(),
            builtin::MESH_RENDERER
        );
    }

    #[test]
    fn values_keep_insertion_order_and_nulls() {
        let types = TypeRegistry::with_builtins();
        let a = SceneObject::new("a", types.object());
        let b = SceneObject::new("b", types.object());
        let mut entry = ObjectEntry::with_values(Key::untyped("k"), [&a, &b]);
        entry.push(ObjectRef::null());

        assert_eq!(entry.len(), 3);
        let live: Vec<String> = entry.live_values().map(|v| v.name().to_string()).collect();
        assert_eq!(live, ["a", "b"]);
        // restartable
        assert_eq!(entry.values().count(), 3);
        assert_eq!(entry.values().count(), 3);

        assert!(entry.remove(&ObjectRef::new(&a)));
        assert!(!entry.remove(&ObjectRef::new(&a)));
        assert_eq!(entry.len(), 2);
    }

    #[test]
    fn valid_values_filter_by_key_type() {
        let types = TypeRegistry::with_builtins();
        let mesh = SceneObject::new("hull", &types.resolve(builtin::MESH));
        let sprite = SceneObject::new("icon", &types.resolve(builtin::SPRITE));
        let key = Key::new("visuals", builtin::MESH);
        let entry = ObjectEntry::with_values(key, [&mesh, &sprite]);

        let valid = entry.valid_values(&types);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].name(), "hull");

        let typed: Vec<Arc<SceneObject>> = entry.values_as::<SceneObject>().collect();
        assert_eq!(typed.len(), 2);
    }
}
