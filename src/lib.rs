//! Typed key → multi-value catalog for runtime objects.
//!
//! The crate is organised around a handful of pieces that build on each
//! other:
//!
//! * [`types`] holds the startup-populated [`TypeRegistry`] and the
//!   [`TypeHandle`]s used for assignability checks.
//! * [`object`] defines the [`Object`] trait and the non-owning
//!   [`ObjectRef`] that catalogs store.
//! * [`catalog`] is the key/entry/index layer: [`Catalog`] answers
//!   `get_values` from an index it rebuilds lazily after mutations.
//! * [`resolver`] converts a value to a key's declared type by searching the
//!   node/capability hierarchy exposed through [`ObjectGraph`];
//!   [`scene`] provides an in-memory hierarchy to run it against.
//! * [`items`] and [`service`] cover identifier-keyed item catalogs and the
//!   per-type registry consumers use to find them.
//!
//! Errors that callers must handle are [`CatalogError`]s; loaders that touch
//! the filesystem return `anyhow::Result` with context instead.

pub mod catalog;
pub mod error;
pub mod items;
pub mod object;
pub mod resolver;
pub mod scene;
pub mod service;
pub mod types;

pub use catalog::{
    AssetEntry, CapabilityEntry, Catalog, CatalogEntry, CatalogLookup, Entry, Key, KeyIndex,
    MaterialEntry, MeshEntry, MeshRendererEntry, NodeEntry, ObjectEntry, RigidbodyEntry,
    SpriteEntry, TextureEntry, ValueKind,
};
pub use error::{CatalogError, Result};
pub use items::{BasicItem, CatalogItem, ItemCatalog};
pub use object::{Object, ObjectRef, SharedObject, downcast_shared, same_object};
pub use resolver::{Descendants, ObjectGraph, ObjectRole, Resolver, SearchStrategy};
pub use scene::{SceneGraph, SceneObject};
pub use service::CatalogService;
pub use types::{TypeCategory, TypeHandle, TypeRegistry, builtin};
