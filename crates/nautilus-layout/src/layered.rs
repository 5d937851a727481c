//! Default engine: port-aware rank/layer layout from `nautilus-layered`.

use crate::engine::{EngineError, EngineOutput, EngineRequest, LayoutEngine};
use futures::FutureExt;
use futures::future::BoxFuture;
use nautilus_core::{Direction, HandleSide, Position};
use nautilus_layered::{LayerEdge, LayerGraph, LayoutSettings, RankDir, Side};

pub const LAYERED_ENGINE: &str = "layered";

#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredEngine;

impl LayoutEngine for LayeredEngine {
    fn name(&self) -> &str {
        LAYERED_ENGINE
    }

    fn calculate(&self, request: EngineRequest) -> BoxFuture<'_, Result<EngineOutput, EngineError>> {
        futures::future::ready(Ok(layout_layered(request))).boxed()
    }
}

fn rank_dir(direction: Direction) -> RankDir {
    match direction {
        Direction::TB => RankDir::TB,
        Direction::BT => RankDir::BT,
        Direction::LR => RankDir::LR,
        Direction::RL => RankDir::RL,
    }
}

fn side(handle: HandleSide) -> Side {
    match handle {
        HandleSide::Top => Side::Top,
        HandleSide::Bottom => Side::Bottom,
        HandleSide::Left => Side::Left,
        HandleSide::Right => Side::Right,
    }
}

/// Runs the layered layout synchronously.
///
/// Positions are top-left corners offset by `margin`; the reported size includes the margin on
/// both sides. An empty scope reports `0 x 0`.
pub fn layout_layered(request: EngineRequest) -> EngineOutput {
    let EngineRequest {
        mut nodes,
        edges,
        direction,
        margin,
        node_spacing,
        layer_spacing,
        default_width,
        default_height,
        include_hidden,
    } = request;

    let mut g = LayerGraph::new();
    for node in nodes.iter().filter(|n| include_hidden || !n.hidden) {
        let size = node.size_or(default_width, default_height);
        g.set_node(node.id.clone(), size.width, size.height);
    }
    for edge in &edges {
        let layer_edge = LayerEdge::new(edge.source.clone(), edge.target.clone())
            .with_sides(edge.source_handle.map(side), edge.target_handle.map(side));
        if !g.add_edge(layer_edge) {
            tracing::debug!(edge_id = %edge.id, "edge endpoint not in this scope; ignoring");
        }
    }

    if g.is_empty() {
        return EngineOutput {
            nodes,
            edges,
            width: 0.0,
            height: 0.0,
        };
    }

    let result = nautilus_layered::layout(
        &g,
        &LayoutSettings {
            rankdir: rank_dir(direction),
            nodesep: node_spacing,
            ranksep: layer_spacing,
        },
    );

    for node in nodes.iter_mut() {
        let (Some(center), Some(laid_out)) = (result.centers.get(&node.id), g.node(&node.id))
        else {
            continue;
        };
        node.position = Position::new(
            center.x - laid_out.width / 2.0 + margin,
            center.y - laid_out.height / 2.0 + margin,
        );
    }

    EngineOutput {
        nodes,
        edges,
        width: result.width + 2.0 * margin,
        height: result.height + 2.0 * margin,
    }
}
