//! Key → multi-value catalog.
//!
//! [`Key`]s are typed identities, entries bind one key to an ordered list of
//! object references, and [`Catalog`] owns the entries plus a derived index
//! that is rebuilt lazily after mutations. [`CatalogLookup`] offers a typed
//! read view for consumers that expect one concrete value type.

pub mod entry;
pub mod index;
pub mod key;
pub mod lookup;
pub mod store;

pub use entry::{
    AnyObject, AssetEntry, AssetValue, CapabilityEntry, CapabilityValue, CatalogEntry, Entry,
    MaterialEntry, MaterialValue, MeshEntry, MeshRendererEntry, MeshRendererValue, MeshValue,
    NodeEntry, NodeValue, ObjectEntry, RigidbodyEntry, RigidbodyValue, SpriteEntry, SpriteValue,
    TextureEntry, TextureValue, ValueKind,
};
pub use index::KeyIndex;
pub use key::Key;
pub use lookup::CatalogLookup;
pub use store::Catalog;
