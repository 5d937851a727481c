//! Container-only hierarchy tree, used to order layout passes bottom-up.
//!
//! Only nodes with at least one child appear here. Leaves are still laid out by their parent's
//! pass; they just never need a pass of their own.

use crate::error::{Error, Result};
use crate::index::ParentIndex;
use crate::model::NodeMap;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub id: String,
    /// 0 for top-level containers.
    pub depth: usize,
    pub parent: Option<usize>,
    /// Arena indices of container children.
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyTree {
    nodes: Vec<HierarchyNode>,
    roots: Vec<usize>,
}

impl HierarchyTree {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&HierarchyNode> {
        self.nodes.get(idx)
    }

    pub fn roots(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.roots.iter().filter_map(|&i| self.nodes.get(i))
    }

    pub fn children<'a>(&'a self, node: &'a HierarchyNode) -> impl Iterator<Item = &'a HierarchyNode> {
        node.children.iter().filter_map(|&i| self.nodes.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.iter()
    }

    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.nodes.iter().map(|n| n.depth).max()
    }

    /// Container ids grouped by depth, in tree order within each group.
    pub fn depth_groups(&self) -> BTreeMap<usize, Vec<&str>> {
        let mut out: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for n in &self.nodes {
            out.entry(n.depth).or_default().push(n.id.as_str());
        }
        out
    }
}

/// Builds the container tree breadth-first from the top level.
///
/// A container whose own node is missing has no parent to hang off, so it starts a tree of its
/// own; its children are still laid out, it just never gets a size. Containers that remain
/// unreachable afterwards sit on or under a parent cycle, which is reported as
/// [`Error::ParentCycle`].
pub fn build_hierarchy(index: &ParentIndex, nodes: &NodeMap) -> Result<HierarchyTree> {
    let mut tree = HierarchyTree::default();
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut queue: VecDeque<(&str, usize, Option<usize>)> = VecDeque::new();

    for id in index.container_ids() {
        match nodes.get(id) {
            Some(node) if node.parent_id.is_some() => {}
            Some(_) => queue.push_back((id, 0, None)),
            None => {
                tracing::debug!(container = %id, "container node is missing; treating it as top-level");
                queue.push_back((id, 0, None));
            }
        }
    }

    while let Some((id, depth, parent)) = queue.pop_front() {
        if !visited.insert(id) {
            continue;
        }

        let idx = tree.nodes.len();
        tree.nodes.push(HierarchyNode {
            id: id.to_string(),
            depth,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => tree.nodes[p].children.push(idx),
            None => tree.roots.push(idx),
        }

        let Some(children) = index.children_of(id) else {
            continue;
        };
        for child in children {
            if index.is_container(child) && !visited.contains(child.as_str()) {
                queue.push_back((child.as_str(), depth + 1, Some(idx)));
            }
        }
    }

    let cyclic: Vec<String> = index
        .container_ids()
        .filter(|id| !visited.contains(id))
        .map(str::to_string)
        .collect();
    if !cyclic.is_empty() {
        return Err(Error::ParentCycle { node_ids: cyclic });
    }
    Ok(tree)
}
