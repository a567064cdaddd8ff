#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use typecatalog::{
    Key, ObjectRef, SceneGraph, SceneObject, SharedObject, TypeHandle, TypeRegistry, builtin,
};

/// Builtin type registry plus a scene to place objects in.
pub struct Fixture {
    pub types: TypeRegistry,
    pub scene: SceneGraph,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            types: TypeRegistry::with_builtins(),
            scene: SceneGraph::new(),
        }
    }

    pub fn ty(&self, name: &str) -> TypeHandle {
        self.types.resolve(name)
    }

    pub fn key(&self, identity: &str, type_name: &str) -> Key {
        Key::of_type(identity, &self.ty(type_name))
    }

    /// Spawn a node; `None` parent makes it a root.
    pub fn node(&mut self, name: &str, parent: Option<&SharedObject>) -> SharedObject {
        let node = SceneObject::shared(name, &self.ty(builtin::NODE));
        self.scene
            .spawn(node, parent)
            .expect("fixture nodes have unique identities and known parents")
    }

    pub fn capability(&mut self, node: &SharedObject, name: &str, type_name: &str) -> SharedObject {
        let capability = SceneObject::shared(name, &self.ty(type_name));
        assert!(
            self.scene.attach(node, capability.clone()),
            "unable to attach {name}"
        );
        capability
    }

    /// A free-standing object outside the scene.
    pub fn asset(&self, name: &str, type_name: &str) -> SharedObject {
        SceneObject::shared(name, &self.ty(type_name))
    }
}

pub fn names(values: impl IntoIterator<Item = SharedObject>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.name().to_string())
        .collect()
}

pub fn live(value: &SharedObject) -> ObjectRef {
    ObjectRef::from(value)
}

pub fn write_json(dir: &Path, file_name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(file_name);
    let text = serde_json::to_string_pretty(value)?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
