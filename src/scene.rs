//! In-memory node/capability hierarchy.
//!
//! `SceneGraph` owns the objects placed in it and implements
//! [`ObjectGraph`] for the resolver. Destroying a node releases the graph's
//! strong handles, so catalog references to the node, its capabilities and
//! its subtree turn null unless someone else still holds them.

use crate::object::{Object, SharedObject};
use crate::resolver::{ObjectGraph, ObjectRole};
use crate::types::TypeHandle;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Plain named object of a registered type.
#[derive(Debug)]
pub struct SceneObject {
    name: String,
    ty: TypeHandle,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, ty: &TypeHandle) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            ty: ty.clone(),
        })
    }

    pub fn shared(name: impl Into<String>, ty: &TypeHandle) -> SharedObject {
        Self::new(name, ty)
    }
}

impl Object for SceneObject {
    fn object_type(&self) -> &TypeHandle {
        &self.ty
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn address(object: &SharedObject) -> usize {
    Arc::as_ptr(object).cast::<()>().addr()
}

#[derive(Debug)]
struct NodeRecord {
    node: SharedObject,
    parent: Option<usize>,
    children: Vec<SharedObject>,
    capabilities: Vec<SharedObject>,
}

#[derive(Debug, Default)]
/// Forest of nodes, each with ordered children and attached capabilities.
pub struct SceneGraph {
    nodes: IndexMap<usize, NodeRecord>,
    owners: HashMap<usize, SharedObject>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` under `parent` (or as a root).
    ///
    /// Returns `None` when the node is already placed or the parent is unknown.
    pub fn spawn(
        &mut self,
        node: SharedObject,
        parent: Option<&SharedObject>,
    ) -> Option<SharedObject> {
        let id = address(&node);
        if self.nodes.contains_key(&id) || self.owners.contains_key(&id) {
            return None;
        }
        let parent_id = match parent {
            Some(parent) => {
                let parent_id = address(parent);
                self.nodes.get_mut(&parent_id)?.children.push(node.clone());
                Some(parent_id)
            }
            None => None,
        };
        self.nodes.insert(
            id,
            NodeRecord {
                node: node.clone(),
                parent: parent_id,
                children: Vec::new(),
                capabilities: Vec::new(),
            },
        );
        Some(node)
    }

    /// Attach `capability` to `node`. Fails if the node is unknown or the
    /// capability is already placed somewhere.
    pub fn attach(&mut self, node: &SharedObject, capability: SharedObject) -> bool {
        let cap_id = address(&capability);
        if self.owners.contains_key(&cap_id) || self.nodes.contains_key(&cap_id) {
            return false;
        }
        let Some(record) = self.nodes.get_mut(&address(node)) else {
            return false;
        };
        record.capabilities.push(capability);
        self.owners.insert(cap_id, record.node.clone());
        true
    }

    /// Remove a capability from its node.
    pub fn detach(&mut self, capability: &SharedObject) -> bool {
        let cap_id = address(capability);
        let Some(owner) = self.owners.remove(&cap_id) else {
            return false;
        };
        if let Some(record) = self.nodes.get_mut(&address(&owner)) {
            record.capabilities.retain(|c| address(c) != cap_id);
        }
        true
    }

    /// Remove `node`, its capabilities and its whole subtree.
    pub fn destroy(&mut self, node: &SharedObject) -> bool {
        let id = address(node);
        let Some(parent_id) = self.nodes.get(&id).map(|record| record.parent) else {
            return false;
        };
        if let Some(parent) = parent_id.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| address(child) != id);
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(record) = self.nodes.shift_remove(&current) {
                for capability in &record.capabilities {
                    self.owners.remove(&address(capability));
                }
                pending.extend(record.children.iter().map(address));
            }
        }
        true
    }

    pub fn contains(&self, object: &SharedObject) -> bool {
        let id = address(object);
        self.nodes.contains_key(&id) || self.owners.contains_key(&id)
    }

    /// Parentless nodes in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &SharedObject> {
        self.nodes
            .values()
            .filter(|record| record.parent.is_none())
            .map(|record| &record.node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl ObjectGraph for SceneGraph {
    fn role(&self, object: &SharedObject) -> ObjectRole {
        let id = address(object);
        if self.nodes.contains_key(&id) {
            return ObjectRole::Node;
        }
        match self.owners.get(&id) {
            Some(owner) => ObjectRole::Capability {
                owner: owner.clone(),
            },
            None => ObjectRole::Detached,
        }
    }

    fn neighbors(&self, node: &SharedObject) -> Vec<SharedObject> {
        self.nodes
            .get(&address(node))
            .map(|record| record.capabilities.clone())
            .unwrap_or_default()
    }

    fn children(&self, node: &SharedObject) -> Vec<SharedObject> {
        self.nodes
            .get(&address(node))
            .map(|record| record.children.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;
    use crate::types::{TypeRegistry, builtin};

    #[test]
    fn spawn_and_attach_validate_placement() {
        let types = TypeRegistry::with_builtins();
        let node_type = types.resolve(builtin::NODE);
        let mut scene = SceneGraph::new();
        let root = scene.spawn(SceneObject::new("root", &node_type), None).unwrap();
        let stray = SceneObject::shared("stray", &node_type);

        assert!(scene.spawn(root.clone(), None).is_none());
        assert!(scene.spawn(SceneObject::new("orphan", &node_type), Some(&stray)).is_none());

        let body = SceneObject::shared("body", &types.resolve(builtin::RIGIDBODY));
        assert!(scene.attach(&root, body.clone()));
        assert!(!scene.attach(&root, body.clone()));
        assert!(!scene.attach(&stray, SceneObject::new("x", &node_type)));
        assert!(matches!(scene.role(&body), ObjectRole::Capability { .. }));
        assert!(matches!(scene.role(&root), ObjectRole::Node));
        assert!(matches!(scene.role(&stray), ObjectRole::Detached));

        assert!(scene.detach(&body));
        assert!(matches!(scene.role(&body), ObjectRole::Detached));
        assert!(scene.neighbors(&root).is_empty());
    }

    #[test]
    fn destroy_releases_subtree() {
        let types = TypeRegistry::with_builtins();
        let node_type = types.resolve(builtin::NODE);
        let mut scene = SceneGraph::new();
        let root = scene.spawn(SceneObject::new("root", &node_type), None).unwrap();
        let child = scene.spawn(SceneObject::new("child", &node_type), Some(&root)).unwrap();
        let grandchild = scene
            .spawn(SceneObject::new("grandchild", &node_type), Some(&child))
            .unwrap();
        let body = SceneObject::shared("body", &types.resolve(builtin::RIGIDBODY));
        scene.attach(&grandchild, body.clone());

        let child_ref = ObjectRef::from(&child);
        let grandchild_ref = ObjectRef::from(&grandchild);
        let body_ref = ObjectRef::from(&body);
        drop((child, grandchild, body));

        assert!(scene.destroy(&scene.children(&root)[0]));
        assert_eq!(scene.node_count(), 1);
        assert!(scene.children(&root).is_empty());
        assert!(child_ref.is_null());
        assert!(grandchild_ref.is_null());
        assert!(body_ref.is_null());
        assert_eq!(scene.roots().count(), 1);
    }
}
