//! Classifies edges by the sides their endpoints attach to.
//!
//! Handles on the flow axis (e.g. bottom → top in a top-to-bottom layout) describe a
//! parent/child relation and separate ranks. Handles on the cross axis (left/right in a
//! top-to-bottom layout) describe siblings: the endpoints may share a rank and are ordered side
//! by side instead.

use crate::RankDir;
use crate::graph::{LayerEdge, LayerGraph, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Target ranks after source.
    Flow,
    /// Target ranks before source.
    Reverse,
    /// No rank separation; `source_first` tells the in-rank order.
    Sibling { source_first: bool },
}

/// Side an edge leaves from when it follows the rank direction.
pub fn forward_side(rankdir: RankDir) -> Side {
    match rankdir {
        RankDir::TB => Side::Bottom,
        RankDir::BT => Side::Top,
        RankDir::LR => Side::Right,
        RankDir::RL => Side::Left,
    }
}

pub fn backward_side(rankdir: RankDir) -> Side {
    opposite(forward_side(rankdir))
}

/// The cross-axis side facing increasing in-rank order.
pub fn after_side(rankdir: RankDir) -> Side {
    match rankdir {
        RankDir::TB | RankDir::BT => Side::Right,
        RankDir::LR | RankDir::RL => Side::Bottom,
    }
}

pub fn before_side(rankdir: RankDir) -> Side {
    opposite(after_side(rankdir))
}

fn opposite(side: Side) -> Side {
    match side {
        Side::Top => Side::Bottom,
        Side::Bottom => Side::Top,
        Side::Left => Side::Right,
        Side::Right => Side::Left,
    }
}

fn is_cross_axis(rankdir: RankDir, side: Side) -> bool {
    side == after_side(rankdir) || side == before_side(rankdir)
}

pub fn classify(rankdir: RankDir, edge: &LayerEdge) -> Attachment {
    if let Some(s) = edge.source_side.filter(|s| is_cross_axis(rankdir, *s)) {
        return Attachment::Sibling {
            source_first: s == after_side(rankdir),
        };
    }
    if let Some(t) = edge.target_side.filter(|t| is_cross_axis(rankdir, *t)) {
        return Attachment::Sibling {
            source_first: t == before_side(rankdir),
        };
    }
    if edge.source_side == Some(backward_side(rankdir))
        || edge.target_side == Some(forward_side(rankdir))
    {
        return Attachment::Reverse;
    }
    Attachment::Flow
}

/// Ranking constraint between two node indices: `rank(w) - rank(v) >= minlen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankEdge {
    pub v: usize,
    pub w: usize,
    pub minlen: usize,
    pub sibling: bool,
}

/// In-rank ordering constraint: `before` is placed left of (or above) `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderConstraint {
    pub before: usize,
    pub after: usize,
}

/// Turns the graph's edges into ranking edges plus sibling ordering constraints.
///
/// Self-loops never constrain anything and are dropped here.
pub fn constraints(g: &LayerGraph, rankdir: RankDir) -> (Vec<RankEdge>, Vec<OrderConstraint>) {
    let mut rank_edges = Vec::new();
    let mut order = Vec::new();

    for e in g.edges() {
        let (Some(s), Some(t)) = (g.node_index(&e.source), g.node_index(&e.target)) else {
            continue;
        };
        if s == t {
            continue;
        }
        match classify(rankdir, e) {
            Attachment::Flow => rank_edges.push(RankEdge {
                v: s,
                w: t,
                minlen: 1,
                sibling: false,
            }),
            Attachment::Reverse => rank_edges.push(RankEdge {
                v: t,
                w: s,
                minlen: 1,
                sibling: false,
            }),
            Attachment::Sibling { source_first } => {
                rank_edges.push(RankEdge {
                    v: s,
                    w: t,
                    minlen: 0,
                    sibling: true,
                });
                order.push(if source_first {
                    OrderConstraint {
                        before: s,
                        after: t,
                    }
                } else {
                    OrderConstraint {
                        before: t,
                        after: s,
                    }
                });
            }
        }
    }

    (rank_edges, order)
}
