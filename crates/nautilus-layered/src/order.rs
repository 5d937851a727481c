//! In-rank ordering: barycenter sweeps with crossing-count bookkeeping.
//!
//! The best ordering seen so far is kept; sweeping stops after a few rounds without
//! improvement. Sibling constraints are re-applied after every layer reorder so they always hold
//! in the returned order.

use crate::ports::{OrderConstraint, RankEdge};

const MAX_SWEEPS: usize = 24;
const MAX_STALE_SWEEPS: usize = 4;

pub fn order(
    mut layers: Vec<Vec<usize>>,
    rank: &[usize],
    edges: &[RankEdge],
    constraints: &[OrderConstraint],
) -> Vec<Vec<usize>> {
    let node_count = rank.len();
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut succs: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for e in edges {
        if e.sibling || rank[e.w] != rank[e.v] + 1 {
            continue;
        }
        succs[e.v].push(e.w);
        preds[e.w].push(e.v);
    }

    let same_rank: Vec<OrderConstraint> = constraints
        .iter()
        .copied()
        .filter(|c| c.before != c.after && rank[c.before] == rank[c.after])
        .collect();

    for layer in layers.iter_mut() {
        apply_constraints(layer, &same_rank);
    }

    let mut pos = vec![0usize; node_count];
    refresh_positions(&layers, &mut pos);

    let mut best = layers.clone();
    let mut best_cc = cross_count(&layers, &succs, &pos);
    let mut stale = 0usize;

    for sweep in 0..MAX_SWEEPS {
        if best_cc == 0 || stale >= MAX_STALE_SWEEPS {
            break;
        }

        if sweep % 2 == 0 {
            for r in 1..layers.len() {
                reorder_layer(&mut layers[r], &preds, &mut pos, &same_rank);
            }
        } else {
            for r in (0..layers.len().saturating_sub(1)).rev() {
                reorder_layer(&mut layers[r], &succs, &mut pos, &same_rank);
            }
        }

        let cc = cross_count(&layers, &succs, &pos);
        if cc < best_cc {
            best_cc = cc;
            best = layers.clone();
            stale = 0;
        } else {
            stale += 1;
        }
    }

    best
}

fn refresh_positions(layers: &[Vec<usize>], pos: &mut [usize]) {
    for layer in layers {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }
}

fn reorder_layer(
    layer: &mut Vec<usize>,
    neighbors: &[Vec<usize>],
    pos: &mut [usize],
    constraints: &[OrderConstraint],
) {
    let mut keyed: Vec<(usize, f64)> = layer
        .iter()
        .map(|&v| {
            let ns = &neighbors[v];
            let bc = if ns.is_empty() {
                pos[v] as f64
            } else {
                ns.iter().map(|&u| pos[u] as f64).sum::<f64>() / ns.len() as f64
            };
            (v, bc)
        })
        .collect();

    keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    *layer = keyed.into_iter().map(|(v, _)| v).collect();
    apply_constraints(layer, constraints);

    for (i, &v) in layer.iter().enumerate() {
        pos[v] = i;
    }
}

/// Moves each `after` node directly behind its `before` node when the order is violated.
///
/// Contradictory constraints cannot all hold; the pass count is bounded so they settle on some
/// order instead of cycling.
pub fn apply_constraints(layer: &mut Vec<usize>, constraints: &[OrderConstraint]) {
    if constraints.is_empty() || layer.len() < 2 {
        return;
    }
    for _ in 0..layer.len() {
        let mut changed = false;
        for c in constraints {
            let (Some(pb), Some(pa)) = (
                layer.iter().position(|&v| v == c.before),
                layer.iter().position(|&v| v == c.after),
            ) else {
                continue;
            };
            if pb < pa {
                continue;
            }
            let moved = layer.remove(pa);
            // `before` shifted left by one after the removal.
            layer.insert(pb, moved);
            changed = true;
        }
        if !changed {
            break;
        }
    }
}

/// Number of crossings between each pair of adjacent layers.
pub fn cross_count(layers: &[Vec<usize>], succs: &[Vec<usize>], pos: &[usize]) -> usize {
    let mut total = 0usize;
    for layer in layers {
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for &v in layer {
            for &w in &succs[v] {
                segments.push((pos[v], pos[w]));
            }
        }
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                    total += 1;
                }
            }
        }
    }
    total
}
