//! Error taxonomy for the catalog crate.
//!
//! Only caller-facing contract violations live here: unregistered item
//! catalogs, malformed authored identifiers, and type registration mistakes
//! made at startup. Type resolution and value conversion never fail; they
//! degrade to the universal object type and `None` respectively.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No item catalog was registered for the requested item type.
    #[error("catalog for item type '{item_type}' has not been registered")]
    NotRegistered { item_type: &'static str },

    /// An item slot in an identifier-keyed catalog is empty.
    #[error("catalog '{catalog}' contains an unassigned item at index {index}")]
    UnassignedItem { catalog: String, index: usize },

    /// An item has a blank identifier.
    #[error("catalog '{catalog}' has an item at index {index} that is missing an identifier")]
    MissingIdentifier { catalog: String, index: usize },

    /// Two items share the same identifier.
    #[error("catalog '{catalog}' contains duplicate id '{id}'")]
    DuplicateIdentifier { catalog: String, id: String },

    /// A lookup was attempted with a blank identifier.
    #[error("catalog '{catalog}': id must be provided")]
    EmptyIdentifier { catalog: String },

    /// A lookup was attempted with an identifier the catalog does not hold.
    #[error("catalog '{catalog}' does not contain an item with id '{id}'")]
    ItemNotFound { catalog: String, id: String },

    /// A type with this qualified name is already registered.
    #[error("type '{name}' is already registered")]
    DuplicateType { name: String },

    /// A type was registered under a parent the registry does not know.
    #[error("type '{name}' names unknown parent type '{parent}'")]
    UnknownParentType { name: String, parent: String },
}
