//! Projection of real edges onto per-scope synthetic edges.
//!
//! A flat layout pass only sees the direct children of one scope. An edge between two deeply
//! nested nodes is therefore replaced by an edge between the children of their lowest common
//! ancestor that contain each endpoint. The original edges are never touched; callers keep
//! returning them as-is.

use crate::ancestry::lowest_common_ancestor;
use crate::model::{ContainerKey, Edge, NodeMap};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedEdge {
    /// Clone of the original with a derived id and the entry nodes as endpoints.
    pub edge: Edge,
    pub original_id: String,
    pub original_source: String,
    pub original_target: String,
}

#[derive(Debug, Clone, Default)]
pub struct EdgeProjection {
    buckets: IndexMap<ContainerKey, Vec<ProjectedEdge>>,
}

impl EdgeProjection {
    pub fn for_container(&self, key: &ContainerKey) -> &[ProjectedEdge] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (&ContainerKey, &[ProjectedEdge])> {
        self.buckets.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}

pub fn projected_edge_id(original_id: &str) -> String {
    format!("{original_id}::projected")
}

/// Groups every edge under the scope that must see it during layout.
///
/// Computed once per layout request; each single-scope pass then reads its own bucket.
pub fn project_edges(edges: &[Edge], nodes: &NodeMap) -> EdgeProjection {
    let mut out = EdgeProjection::default();

    for edge in edges {
        if !nodes.contains_key(&edge.source) || !nodes.contains_key(&edge.target) {
            tracing::debug!(
                edge_id = %edge.id,
                source = %edge.source,
                target = %edge.target,
                "skipping edge with unresolved endpoint"
            );
            continue;
        }

        let Some(lca) = lowest_common_ancestor(&edge.source, &edge.target, nodes) else {
            tracing::warn!(
                edge_id = %edge.id,
                source = %edge.source,
                target = %edge.target,
                "endpoints share no common ancestor; check the parent chains"
            );
            continue;
        };

        if lca.source_entry == lca.target_entry {
            continue;
        }

        let mut projected = edge.clone();
        projected.id = projected_edge_id(&edge.id);
        projected.source = lca.source_entry;
        projected.target = lca.target_entry;

        out.buckets
            .entry(lca.ancestor)
            .or_default()
            .push(ProjectedEdge {
                edge: projected,
                original_id: edge.id.clone(),
                original_source: edge.source.clone(),
                original_target: edge.target.clone(),
            });
    }

    out
}
