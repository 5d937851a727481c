//! Scoping a re-layout to the containers touched by a selection.

use crate::index::ParentIndex;
use crate::model::{ContainerKey, NodeMap};
use indexmap::IndexSet;

/// Returns the minimal list of scopes to re-layout for `selected`.
///
/// A selected container is re-laid-out itself; a selected leaf triggers its immediate container.
/// Containers whose parent is also in the result are dropped, since the parent pass covers them.
/// When nothing qualifies the top level is returned so top-level arrangement still happens.
pub fn containers_for_selection<'a, I>(
    selected: I,
    index: &ParentIndex,
    nodes: &NodeMap,
) -> Vec<ContainerKey>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates: IndexSet<&str> = IndexSet::new();
    for id in selected {
        match nodes.get_key_value(id) {
            Some((id, node)) => {
                candidates.insert(id.as_str());
                if let Some(parent_id) = node.parent_id.as_deref() {
                    candidates.insert(parent_id);
                }
            }
            // A parent id without a node of its own still scopes its children.
            None if index.is_container(id) => {
                candidates.insert(id);
            }
            None => tracing::debug!(node_id = %id, "selected node is not in the snapshot"),
        }
    }

    candidates.retain(|id| index.is_container(id));

    let out: Vec<ContainerKey> = candidates
        .iter()
        .filter(|id| {
            let parent = nodes.get(**id).and_then(|n| n.parent_id.as_deref());
            !parent.is_some_and(|p| candidates.contains(p))
        })
        .map(|id| ContainerKey::node(*id))
        .collect();

    if out.is_empty() {
        return vec![ContainerKey::Root];
    }
    out
}
