//! Flat input graph for a single layout pass.

use indexmap::IndexMap;

/// Side of a box an edge endpoint attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerEdge {
    pub source: String,
    pub target: String,
    pub source_side: Option<Side>,
    pub target_side: Option<Side>,
}

impl LayerEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_side: None,
            target_side: None,
        }
    }

    pub fn with_sides(mut self, source: Option<Side>, target: Option<Side>) -> Self {
        self.source_side = source;
        self.target_side = target;
        self
    }
}

/// Nodes in insertion order plus the edges between them.
///
/// Edges are only accepted when both endpoints are already present; everything downstream can
/// therefore index nodes without re-checking.
#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    nodes: IndexMap<String, LayerNode>,
    edges: Vec<LayerEdge>,
}

impl LayerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_node(&mut self, id: impl Into<String>, width: f64, height: f64) {
        let id = id.into();
        self.nodes.insert(
            id.clone(),
            LayerNode {
                id,
                width: width.max(0.0),
                height: height.max(0.0),
            },
        );
    }

    /// Returns `false` (and drops the edge) when an endpoint is unknown.
    pub fn add_edge(&mut self, edge: LayerEdge) -> bool {
        if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    pub fn node(&self, id: &str) -> Option<&LayerNode> {
        self.nodes.get(id)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &LayerNode> {
        self.nodes.values()
    }

    pub fn node_at(&self, idx: usize) -> Option<&LayerNode> {
        self.nodes.get_index(idx).map(|(_, n)| n)
    }

    pub fn edges(&self) -> &[LayerEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
