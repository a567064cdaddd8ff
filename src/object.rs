//! Runtime object references stored in catalogs.
//!
//! Catalogs associate keys with objects they do not own. Owners hold
//! [`SharedObject`]s; catalogs hold [`ObjectRef`]s, which go "null" once every
//! owner has dropped the object. Identity is pointer identity.

use crate::types::TypeHandle;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

/// Upcasting helpers, implemented for every sized `Object`.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// A live object that can be catalogued.
pub trait Object: AsAny + fmt::Debug {
    /// Runtime type used for assignability checks.
    fn object_type(&self) -> &TypeHandle;

    fn name(&self) -> &str;
}

/// Strong, owning handle to an object.
pub type SharedObject = Arc<dyn Object>;

/// Attempt to view a shared object as a concrete Rust type.
pub fn downcast_shared<T: Object>(object: SharedObject) -> Option<Arc<T>> {
    object.into_any_arc().downcast::<T>().ok()
}

// Uninhabited; only used as the pointee of null references.
#[derive(Debug)]
enum Never {}

impl Object for Never {
    fn object_type(&self) -> &TypeHandle {
        match *self {}
    }

    fn name(&self) -> &str {
        match *self {}
    }
}

/// Non-owning, nullable reference to an object.
#[derive(Clone)]
pub struct ObjectRef(Weak<dyn Object>);

impl ObjectRef {
    pub fn new<T: Object>(object: &Arc<T>) -> Self {
        let weak: Weak<T> = Arc::downgrade(object);
        Self(weak)
    }

    /// A reference that never resolves.
    pub fn null() -> Self {
        let weak: Weak<Never> = Weak::new();
        Self(weak)
    }

    /// The object, if anything still owns it.
    pub fn get(&self) -> Option<SharedObject> {
        self.0.upgrade()
    }

    pub fn is_null(&self) -> bool {
        self.0.strong_count() == 0
    }

    /// True when both references point at the same allocation.
    pub fn same_object(&self, object: &SharedObject) -> bool {
        std::ptr::addr_eq(self.0.as_ptr(), Arc::as_ptr(object))
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ObjectRef {}

impl From<&SharedObject> for ObjectRef {
    fn from(object: &SharedObject) -> Self {
        Self(Arc::downgrade(object))
    }
}

impl From<SharedObject> for ObjectRef {
    fn from(object: SharedObject) -> Self {
        Self(Arc::downgrade(&object))
    }
}

impl<T: Object> From<&Arc<T>> for ObjectRef {
    fn from(object: &Arc<T>) -> Self {
        Self::new(object)
    }
}

impl<T: Object> From<Option<&Arc<T>>> for ObjectRef {
    fn from(object: Option<&Arc<T>>) -> Self {
        object.map_or_else(Self::null, Self::new)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(object) => write!(f, "ObjectRef({:?})", object.name()),
            None => f.write_str("ObjectRef(null)"),
        }
    }
}

/// Pointer equality for strong handles.
pub fn same_object(a: &SharedObject, b: &SharedObject) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
