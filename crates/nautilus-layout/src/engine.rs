//! The layout engine contract.
//!
//! An engine arranges one flat scope: it sees the direct children of a single container plus the
//! projected edges for that container, and reports positions and the overall bounding size. It
//! knows nothing about nesting.

use futures::future::BoxFuture;
use nautilus_core::{Direction, Edge, LayoutOptions, Node};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineRequest {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub direction: Direction,
    pub margin: f64,
    pub node_spacing: f64,
    pub layer_spacing: f64,
    /// Size used for nodes without an explicit width/height.
    pub default_width: f64,
    pub default_height: f64,
    /// When `false`, hidden nodes are returned untouched and take no space.
    pub include_hidden: bool,
}

impl EngineRequest {
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        direction: Direction,
        options: &LayoutOptions,
    ) -> Self {
        Self {
            nodes,
            edges,
            direction,
            margin: options.margin,
            node_spacing: options.node_spacing,
            layer_spacing: options.layer_spacing,
            default_width: options.default_width,
            default_height: options.default_height,
            include_hidden: options.include_hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    /// The request nodes with updated positions.
    pub nodes: Vec<Node>,
    /// Passthrough of the request edges.
    pub edges: Vec<Edge>,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A pluggable single-scope layout algorithm.
///
/// The returned future is runtime-agnostic; synchronous engines can simply return
/// `futures::future::ready(..).boxed()`.
pub trait LayoutEngine: Send + Sync {
    /// Registry key.
    fn name(&self) -> &str;

    fn calculate(&self, request: EngineRequest) -> BoxFuture<'_, Result<EngineOutput, EngineError>>;
}
