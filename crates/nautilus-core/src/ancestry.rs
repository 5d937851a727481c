//! Ancestor chains and lowest-common-ancestor lookup.
//!
//! Paths are ordered nearest-first: `[node, parent, grandparent, ..., Root]`. Walking stops as
//! soon as an id repeats or a parent does not resolve, so malformed parent chains never loop; such
//! paths simply do not end in [`ContainerKey::Root`].

use crate::model::{ContainerKey, NodeMap};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathEnd {
    /// The walk reached a node without a parent; the path ends with `Root`.
    Root,
    /// `revisited` was reached twice.
    Cycle { revisited: String },
    /// The last node names a parent that is not in the lookup table; that parent id is the last
    /// key, so siblings under it still share a scope.
    MissingParent { parent_id: String },
    /// The starting id itself does not resolve.
    UnknownNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorPath {
    pub keys: Vec<ContainerKey>,
    pub end: PathEnd,
}

impl AncestorPath {
    pub fn is_complete(&self) -> bool {
        self.end == PathEnd::Root
    }

    pub fn last(&self) -> Option<&ContainerKey> {
        self.keys.last()
    }
}

pub fn ancestor_path(node_id: &str, nodes: &NodeMap) -> AncestorPath {
    let mut keys: Vec<ContainerKey> = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    let Some((mut cur_id, mut cur)) = nodes.get_key_value(node_id) else {
        return AncestorPath {
            keys,
            end: PathEnd::UnknownNode,
        };
    };

    loop {
        seen.insert(cur_id.as_str());
        keys.push(ContainerKey::Node(cur_id.clone()));

        let Some(parent_id) = cur.parent_id.as_deref() else {
            keys.push(ContainerKey::Root);
            return AncestorPath {
                keys,
                end: PathEnd::Root,
            };
        };
        if seen.contains(parent_id) {
            return AncestorPath {
                keys,
                end: PathEnd::Cycle {
                    revisited: parent_id.to_string(),
                },
            };
        }
        let Some((next_id, next)) = nodes.get_key_value(parent_id) else {
            keys.push(ContainerKey::node(parent_id));
            return AncestorPath {
                keys,
                end: PathEnd::MissingParent {
                    parent_id: parent_id.to_string(),
                },
            };
        };
        cur_id = next_id;
        cur = next;
    }
}

/// The shared scope of two nodes and the child of that scope leading to each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonAncestor {
    pub ancestor: ContainerKey,
    pub source_entry: String,
    pub target_entry: String,
}

pub fn lowest_common_ancestor(
    source_id: &str,
    target_id: &str,
    nodes: &NodeMap,
) -> Option<CommonAncestor> {
    let source = ancestor_path(source_id, nodes);
    let target = ancestor_path(target_id, nodes);

    let target_set: FxHashSet<&ContainerKey> = target.keys.iter().collect();
    let (si, ancestor) = source
        .keys
        .iter()
        .enumerate()
        .find(|(_, k)| target_set.contains(k))?;
    let ti = target.keys.iter().position(|k| k == ancestor)?;

    Some(CommonAncestor {
        ancestor: ancestor.clone(),
        source_entry: entry_at(&source.keys, si, source_id),
        target_entry: entry_at(&target.keys, ti, target_id),
    })
}

// The key just below the ancestor; the node itself when the ancestor is the node.
fn entry_at(keys: &[ContainerKey], ancestor_pos: usize, fallback: &str) -> String {
    if ancestor_pos == 0 {
        return fallback.to_string();
    }
    keys[ancestor_pos - 1]
        .node_id()
        .unwrap_or(fallback)
        .to_string()
}
