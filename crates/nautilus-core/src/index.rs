//! Parent → children index over a node snapshot.

use crate::model::{ContainerKey, NodeMap};
use indexmap::{IndexMap, IndexSet};

/// Maps every scope to its direct children, in node insertion order.
///
/// The [`ContainerKey::Root`] entry always exists. A parent id that does not resolve to a node
/// still keys its children, so the orphaned children get a scope of their own.
#[derive(Debug, Clone)]
pub struct ParentIndex {
    children: IndexMap<ContainerKey, IndexSet<String>>,
}

impl Default for ParentIndex {
    fn default() -> Self {
        let mut children = IndexMap::new();
        children.insert(ContainerKey::Root, IndexSet::new());
        Self { children }
    }
}

impl ParentIndex {
    pub fn build(nodes: &NodeMap) -> Self {
        let mut idx = Self::default();
        for (id, node) in nodes {
            idx.children
                .entry(node.parent_key())
                .or_default()
                .insert(id.clone());
        }
        idx
    }

    pub fn children(&self, key: &ContainerKey) -> Option<&IndexSet<String>> {
        self.children.get(key)
    }

    pub fn children_of(&self, id: &str) -> Option<&IndexSet<String>> {
        self.children.get(&ContainerKey::node(id))
    }

    /// `true` when `key` has at least one direct child.
    pub fn has_children(&self, key: &ContainerKey) -> bool {
        self.children.get(key).is_some_and(|c| !c.is_empty())
    }

    /// `true` when `id` has at least one direct child, whether or not `id` itself resolves.
    pub fn is_container(&self, id: &str) -> bool {
        self.children_of(id).is_some_and(|c| !c.is_empty())
    }

    /// Container ids (excluding the root), in first-seen order.
    pub fn container_ids(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|(key, kids)| {
            let id = key.node_id()?;
            (!kids.is_empty()).then_some(id)
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &ContainerKey> {
        self.children.keys()
    }
}
