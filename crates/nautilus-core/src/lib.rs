#![forbid(unsafe_code)]

//! Nested diagram model and hierarchy analysis (headless).
//!
//! This crate answers the structural questions a hierarchical layout needs before any geometry
//! is computed:
//! - which containers exist and in what bottom-up order they must be laid out
//! - which scope each edge belongs to once it is projected across container boundaries
//! - which scopes a selection-driven re-layout has to touch
//!
//! Everything here is pure and synchronous; the async orchestration lives in `nautilus-layout`.

pub mod ancestry;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod index;
pub mod model;
pub mod projection;
pub mod selection;

pub use ancestry::{AncestorPath, CommonAncestor, PathEnd, ancestor_path, lowest_common_ancestor};
pub use config::{LayoutConfig, LayoutOptions};
pub use error::{Error, Result};
pub use hierarchy::{HierarchyNode, HierarchyTree, build_hierarchy};
pub use index::ParentIndex;
pub use model::{
    ContainerKey, Direction, Edge, HandleSide, Node, NodeData, NodeMap, NodeStyle, Position,
    ROOT_SENTINEL, Size, node_map,
};
pub use projection::{EdgeProjection, ProjectedEdge, project_edges, projected_edge_id};
pub use selection::containers_for_selection;

/// A host snapshot: the node and edge lists as the host owns them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests;
