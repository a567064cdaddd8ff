//! Best-effort conversion of an object to a target type.
//!
//! When a value does not satisfy a key's declared type, the resolver looks
//! for a related object that does: a capability attached to the same node, or
//! one attached somewhere below it. The resolver only sees the hierarchy
//! through [`ObjectGraph`], so any scene representation (or a test double)
//! can back it. Conversion is a read-only traversal; a miss is `None`, never
//! an error.

use crate::object::{ObjectRef, SharedObject};
use crate::types::TypeHandle;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How broadly the resolver searches around the input object.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// First matching capability on the node, in attachment order.
    #[default]
    First,
    /// First match among all capabilities on the node. The graph exposes a
    /// single attachment order, so this yields the same result as `First`.
    AllOnObjectFirst,
    /// Pre-order search of the node and then its descendants.
    FirstInDescendantsIncludingSelf,
}

/// Where an object sits in the hierarchy.
#[derive(Clone, Debug)]
pub enum ObjectRole {
    Node,
    Capability { owner: SharedObject },
    /// Not part of the graph (assets, free-standing objects).
    Detached,
}

/// Read-only view of a node/capability hierarchy.
pub trait ObjectGraph {
    fn role(&self, object: &SharedObject) -> ObjectRole;

    /// Capabilities attached to `node`, in attachment order.
    fn neighbors(&self, node: &SharedObject) -> Vec<SharedObject>;

    /// Direct child nodes of `node`, in order.
    fn children(&self, node: &SharedObject) -> Vec<SharedObject>;

    /// Lazy pre-order walk of every node below `node`.
    fn descendants<'g>(&'g self, node: &SharedObject) -> Descendants<'g, Self>
    where
        Self: Sized,
    {
        Descendants::new(self, node)
    }
}

/// Pre-order iterator over the nodes below a root, root excluded.
pub struct Descendants<'g, G: ObjectGraph + ?Sized> {
    graph: &'g G,
    stack: Vec<SharedObject>,
}

impl<'g, G: ObjectGraph + ?Sized> Descendants<'g, G> {
    pub fn new(graph: &'g G, root: &SharedObject) -> Self {
        let mut stack = graph.children(root);
        stack.reverse();
        Self { graph, stack }
    }
}

impl<G: ObjectGraph + ?Sized> Iterator for Descendants<'_, G> {
    type Item = SharedObject;

    fn next(&mut self) -> Option<SharedObject> {
        let node = self.stack.pop()?;
        let children = self.graph.children(&node);
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

/// Locates type-compatible neighbors of objects within one graph.
pub struct Resolver<'g, G: ObjectGraph + ?Sized> {
    graph: &'g G,
}

impl<'g, G: ObjectGraph + ?Sized> Resolver<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Convert `value` to `target`, or `None` when nothing nearby fits.
    ///
    /// Values that already satisfy `target` are returned unchanged. Nodes are
    /// searched directly; capabilities are searched through their owning node.
    pub fn convert(
        &self,
        value: &ObjectRef,
        target: Option<&TypeHandle>,
        strategy: SearchStrategy,
    ) -> Option<SharedObject> {
        let value = value.get()?;
        let target = target?;
        self.convert_shared(&value, target, strategy)
    }

    /// [`Resolver::convert`] for a live, non-null value.
    pub fn convert_shared(
        &self,
        value: &SharedObject,
        target: &TypeHandle,
        strategy: SearchStrategy,
    ) -> Option<SharedObject> {
        if target.is_assignable_from(value.object_type()) {
            return Some(value.clone());
        }
        let found = match self.graph.role(value) {
            ObjectRole::Node => self.search(value, target, strategy),
            ObjectRole::Capability { owner } => self.search(&owner, target, strategy),
            ObjectRole::Detached => None,
        };
        if found.is_none() {
            trace!(
                object = value.name(),
                target = target.name(),
                ?strategy,
                "no convertible neighbor"
            );
        }
        found
    }

    fn search(
        &self,
        node: &SharedObject,
        target: &TypeHandle,
        strategy: SearchStrategy,
    ) -> Option<SharedObject> {
        match strategy {
            SearchStrategy::First | SearchStrategy::AllOnObjectFirst => {
                self.first_on_node(node, target)
            }
            SearchStrategy::FirstInDescendantsIncludingSelf => {
                self.first_on_node(node, target).or_else(|| {
                    Descendants::new(self.graph, node)
                        .find_map(|descendant| self.first_on_node(&descendant, target))
                })
            }
        }
    }

    fn first_on_node(&self, node: &SharedObject, target: &TypeHandle) -> Option<SharedObject> {
        self.graph
            .neighbors(node)
            .into_iter()
            .find(|capability| target.is_assignable_from(capability.object_type()))
    }
}
