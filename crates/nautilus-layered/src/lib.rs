#![forbid(unsafe_code)]

//! Rank/layer layout for one flat set of boxes.
//!
//! Pipeline (all deterministic for identical input):
//! 1. classify edges by handle side into rank edges and sibling order constraints ([`ports`])
//! 2. break cycles ([`acyclic`])
//! 3. longest-path ranking, sibling compaction ([`rank`])
//! 4. barycenter crossing reduction ([`order`])
//! 5. top-to-bottom coordinates, then the direction transform ([`position`])

pub mod acyclic;
pub mod graph;
pub mod order;
pub mod ports;
pub mod position;
pub mod rank;

pub use graph::{LayerEdge, LayerGraph, LayerNode, Side};
pub use ports::{Attachment, classify};

use indexmap::IndexMap;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub rankdir: RankDir,
    /// Gap between neighbours within a rank.
    pub nodesep: f64,
    /// Gap between consecutive ranks.
    pub ranksep: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Node centers; the bounding box of all boxes starts at (0, 0).
    pub centers: IndexMap<String, Point>,
    pub ranks: IndexMap<String, usize>,
    pub width: f64,
    pub height: f64,
    /// Number of rank edges reversed to break cycles.
    pub reversed_edges: usize,
}

pub fn layout(g: &LayerGraph, settings: &LayoutSettings) -> LayoutResult {
    if g.is_empty() {
        return LayoutResult::default();
    }
    let n = g.node_count();

    let (mut rank_edges, constraints) = ports::constraints(g, settings.rankdir);
    let reversed_edges = acyclic::run(n, &mut rank_edges);

    let mut ranks = rank::longest_path(n, &rank_edges);
    rank::tighten_siblings(&mut ranks, &rank_edges);
    rank::compact(&mut ranks);

    let layers = order::order(rank::layers(&ranks), &ranks, &rank_edges, &constraints);

    let sizes: Vec<(f64, f64)> = g
        .nodes()
        .map(|node| position::oriented_size(settings.rankdir, node.width, node.height))
        .collect();
    let (mut centers, _, rank_extent) =
        position::assign(&layers, &sizes, settings.nodesep.max(0.0), settings.ranksep.max(0.0));
    position::undo_orientation(settings.rankdir, &mut centers, rank_extent);

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (node, c) in g.nodes().zip(&centers) {
        min_x = min_x.min(c.x - node.width / 2.0);
        min_y = min_y.min(c.y - node.height / 2.0);
        max_x = max_x.max(c.x + node.width / 2.0);
        max_y = max_y.max(c.y + node.height / 2.0);
    }

    let mut out = LayoutResult {
        width: max_x - min_x,
        height: max_y - min_y,
        reversed_edges,
        ..Default::default()
    };
    for ((node, c), r) in g.nodes().zip(&centers).zip(&ranks) {
        out.centers.insert(
            node.id.clone(),
            Point {
                x: c.x - min_x,
                y: c.y - min_y,
            },
        );
        out.ranks.insert(node.id.clone(), *r);
    }
    out
}
