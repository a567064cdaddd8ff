use crate::types::{TypeHandle, TypeRegistry, builtin};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

fn default_type_name() -> String {
    builtin::OBJECT.to_string()
}

/// Typed identity used to group values in a catalog.
///
/// Keys are authored separately from the catalogs that use them and arrive
/// deserialized: an identity name plus the qualified name of the declared
/// value type. The resolved [`TypeHandle`] is cached until the stored name
/// changes or [`Key::reload`] is called.
///
/// Equality and hashing use `(identity, type_name)`, so two separately loaded
/// copies of the same key are interchangeable for every catalog operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Key {
    identity: String,
    #[serde(default = "default_type_name")]
    type_name: String,
    #[serde(skip)]
    resolved: OnceLock<TypeHandle>,
}

impl Key {
    pub fn new(identity: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            type_name: type_name.into(),
            resolved: OnceLock::new(),
        }
    }

    /// Key whose declared type is the universal object type.
    pub fn untyped(identity: impl Into<String>) -> Self {
        Self::new(identity, builtin::OBJECT)
    }

    pub fn of_type(identity: impl Into<String>, ty: &TypeHandle) -> Self {
        Self::new(identity, ty.name())
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Raw stored type name, exactly as authored.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        let type_name = type_name.into();
        if self.type_name != type_name {
            self.type_name = type_name;
            self.resolved.take();
        }
    }

    /// Declared value type, resolved through `types` on first use.
    ///
    /// Never fails: an unresolvable name yields the universal object type.
    /// That fallback is not cached, so a type registered later is picked up
    /// by the next call.
    pub fn associated_type(&self, types: &TypeRegistry) -> TypeHandle {
        if let Some(ty) = self.resolved.get() {
            return ty.clone();
        }
        let ty = types.resolve(&self.type_name);
        if !ty.is_universal() || self.type_name.trim() == builtin::OBJECT {
            let _ = self.resolved.set(ty.clone());
        }
        ty
    }

    /// Store `ty`'s qualified name, or the universal type's name for `None`.
    pub fn set_associated_type(&mut self, ty: Option<&TypeHandle>) {
        self.type_name = ty.map_or(builtin::OBJECT, TypeHandle::name).to_string();
        self.resolved.take();
    }

    /// Drop the cached type so the next access re-resolves.
    pub fn reload(&mut self) {
        self.resolved.take();
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.identity == other.identity && self.type_name == other.type_name)
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
        self.type_name.hash(state);
    }
}

/// `identity (ShortName)`, where the short name comes from the stored type
/// name as authored, whether or not it resolves. A blank name shows as
/// `Object`.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self
            .type_name
            .split(',')
            .next()
            .and_then(|name| name.trim().rsplit("::").next())
            .filter(|short| !short.is_empty())
            .unwrap_or("Object");
        write!(f, "{} ({})", self.identity, short)
    }
}
