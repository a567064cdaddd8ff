//! Type descriptors and the startup-populated type registry.
//!
//! Keys store their declared type as a qualified name string (for example
//! `assets::Mesh`). The registry turns those strings into [`TypeHandle`]s with
//! a table lookup: exact qualified name first, then a scan by short name
//! across namespaces. Anything unresolvable becomes the universal object type,
//! so resolution is total.

pub mod category;

pub use category::TypeCategory;

use crate::error::{CatalogError, Result};
use indexmap::IndexMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// Qualified names of the descriptors registered by [`TypeRegistry::with_builtins`].
pub mod builtin {
    /// The universal "any object" type every other type derives from.
    pub const OBJECT: &str = "core::Object";
    pub const NODE: &str = "core::Node";
    pub const CAPABILITY: &str = "core::Capability";
    pub const BEHAVIOUR: &str = "core::Behaviour";
    pub const ASSET: &str = "core::Asset";
    pub const TEXTURE: &str = "assets::Texture";
    pub const TEXTURE_2D: &str = "assets::Texture2D";
    pub const MATERIAL: &str = "assets::Material";
    pub const MESH: &str = "assets::Mesh";
    pub const AUDIO_CLIP: &str = "assets::AudioClip";
    pub const SPRITE: &str = "assets::Sprite";
    pub const RIGIDBODY: &str = "physics::Rigidbody";
    pub const MESH_RENDERER: &str = "rendering::MeshRenderer";

    /// `(name, parent)` pairs in registration order.
    pub(crate) const DESCRIPTORS: &[(&str, &str)] = &[
        (NODE, OBJECT),
        (CAPABILITY, OBJECT),
        (BEHAVIOUR, CAPABILITY),
        (ASSET, OBJECT),
        (TEXTURE, OBJECT),
        (TEXTURE_2D, TEXTURE),
        (MATERIAL, OBJECT),
        (MESH, OBJECT),
        (AUDIO_CLIP, OBJECT),
        (SPRITE, OBJECT),
        (RIGIDBODY, CAPABILITY),
        (MESH_RENDERER, CAPABILITY),
    ];
}

#[derive(Debug)]
struct TypeInfo {
    name: String,
    short_name: String,
    namespace: Option<String>,
    parent: Option<TypeHandle>,
}

/// Cheap, clonable handle to a registered type descriptor.
///
/// Two handles are equal when they name the same qualified type.
#[derive(Clone)]
pub struct TypeHandle(Arc<TypeInfo>);

impl TypeHandle {
    fn new(name: &str, parent: Option<TypeHandle>) -> Self {
        let (namespace, short_name) = match name.rsplit_once("::") {
            Some((namespace, short)) => (Some(namespace.to_string()), short.to_string()),
            None => (None, name.to_string()),
        };
        Self(Arc::new(TypeInfo {
            name: name.to_string(),
            short_name,
            namespace,
            parent,
        }))
    }

    /// Fully qualified name, the form stored in keys.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Last path segment of the qualified name.
    pub fn short_name(&self) -> &str {
        &self.0.short_name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.0.namespace.as_deref()
    }

    /// Direct base type; `None` only for the universal object type.
    pub fn parent(&self) -> Option<&TypeHandle> {
        self.0.parent.as_ref()
    }

    /// This type followed by each base type up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeHandle> {
        std::iter::successors(Some(self), |ty| ty.parent())
    }

    /// True when a value of type `other` can be used where `self` is expected.
    pub fn is_assignable_from(&self, other: &TypeHandle) -> bool {
        other.ancestors().any(|ty| ty == self)
    }

    pub fn is_universal(&self) -> bool {
        self.parent().is_none()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.0.name)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// Lookup table from qualified type names to descriptors.
///
/// Populate it once at startup; after that every resolution is a map lookup
/// plus, for legacy short names, a linear scan over registered descriptors.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    object: TypeHandle,
    types: IndexMap<String, TypeHandle>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TypeRegistry {
    /// Registry holding only the universal object type.
    pub fn new() -> Self {
        let object = TypeHandle::new(builtin::OBJECT, None);
        let mut types = IndexMap::new();
        types.insert(builtin::OBJECT.to_string(), object.clone());
        Self { object, types }
    }

    /// Registry preloaded with the node, capability and asset families.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, parent) in builtin::DESCRIPTORS {
            let parent = registry.types[*parent].clone();
            let handle = TypeHandle::new(name, Some(parent));
            registry.types.insert((*name).to_string(), handle);
        }
        registry
    }

    /// Register `name` as a subtype of `parent` (the universal type when `None`).
    pub fn register(&mut self, name: &str, parent: Option<&str>) -> Result<TypeHandle> {
        if self.types.contains_key(name) {
            return Err(CatalogError::DuplicateType {
                name: name.to_string(),
            });
        }
        let parent = match parent {
            Some(parent_name) => self
                .types
                .get(parent_name)
                .cloned()
                .ok_or_else(|| CatalogError::UnknownParentType {
                    name: name.to_string(),
                    parent: parent_name.to_string(),
                })?,
            None => self.object.clone(),
        };
        let handle = TypeHandle::new(name, Some(parent));
        self.types.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    /// The universal "any object" type.
    pub fn object(&self) -> &TypeHandle {
        &self.object
    }

    /// Exact qualified-name lookup.
    pub fn get(&self, name: &str) -> Option<&TypeHandle> {
        self.types.get(name)
    }

    /// Exact lookup, then a scan for a descriptor with a matching short name.
    ///
    /// Names written in the `Type, Module` form have the module suffix
    /// stripped before scanning.
    pub fn find(&self, name: &str) -> Option<&TypeHandle> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(found) = self.types.get(name) {
            return Some(found);
        }
        let bare = name.split(',').next().unwrap_or(name).trim();
        if let Some(found) = self.types.get(bare) {
            return Some(found);
        }
        let short = bare.rsplit("::").next().unwrap_or(bare);
        let scanned = self.types.values().find(|ty| ty.short_name() == short);
        if let Some(ty) = scanned {
            debug!(requested = name, resolved = ty.name(), "resolved type by short name");
        }
        scanned
    }

    /// Total resolution: unknown names fall back to [`TypeRegistry::object`].
    pub fn resolve(&self, name: &str) -> TypeHandle {
        match self.find(name) {
            Some(ty) => ty.clone(),
            None => {
                debug!(requested = name, "unresolvable type name, using universal object type");
                self.object.clone()
            }
        }
    }

    /// Registered descriptors in registration order, the root first.
    pub fn iter(&self) -> impl Iterator<Item = &TypeHandle> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_form_a_single_rooted_hierarchy() {
        let registry = TypeRegistry::with_builtins();
        for ty in registry.iter() {
            assert_eq!(ty.ancestors().last(), Some(registry.object()));
        }
        let behaviour = registry.get(builtin::BEHAVIOUR).unwrap();
        let capability = registry.get(builtin::CAPABILITY).unwrap();
        assert!(capability.is_assignable_from(behaviour));
        assert!(!behaviour.is_assignable_from(capability));
        assert!(registry.object().is_assignable_from(behaviour));
    }

    #[test]
    fn resolve_falls_back_to_universal_type() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(&registry.resolve("nowhere::Missing"), registry.object());
        assert_eq!(&registry.resolve(""), registry.object());
        assert!(registry.resolve("   ").is_universal());
    }

    #[test]
    fn resolve_scans_short_and_module_qualified_names() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(registry.resolve("Mesh").name(), builtin::MESH);
        assert_eq!(registry.resolve("legacy::Sprite").name(), builtin::SPRITE);
        assert_eq!(
            registry.resolve("physics::Rigidbody, PhysicsModule").name(),
            builtin::RIGIDBODY
        );
    }

    #[test]
    fn register_rejects_duplicates_and_unknown_parents() {
        let mut registry = TypeRegistry::with_builtins();
        let health = registry
            .register("game::Health", Some(builtin::BEHAVIOUR))
            .unwrap();
        assert_eq!(health.short_name(), "Health");
        assert_eq!(health.namespace(), Some("game"));
        assert_eq!(
            registry.register("game::Health", None),
            Err(CatalogError::DuplicateType {
                name: "game::Health".into()
            })
        );
        assert!(matches!(
            registry.register("game::Ammo", Some("game::Inventory")),
            Err(CatalogError::UnknownParentType { .. })
        ));
    }
}
