//! Coordinate assignment in top-to-bottom space plus the rank-direction transforms.
//!
//! Like Dagre, positioning always works top-to-bottom. For LR/RL the node boxes are swapped
//! before positioning and the axes are swapped back afterwards; BT/RL mirror the rank axis.

use crate::{Point, RankDir};

/// Node centers in top-to-bottom space, plus the extent `(width, height)` of that space.
///
/// `sizes[v]` must already be in top-to-bottom orientation (see [`oriented_size`]).
pub fn assign(
    layers: &[Vec<usize>],
    sizes: &[(f64, f64)],
    nodesep: f64,
    ranksep: f64,
) -> (Vec<Point>, f64, f64) {
    let mut centers = vec![Point { x: 0.0, y: 0.0 }; sizes.len()];

    let mut rank_heights: Vec<f64> = Vec::with_capacity(layers.len());
    let mut rank_widths: Vec<f64> = Vec::with_capacity(layers.len());
    for ids in layers {
        let mut h: f64 = 0.0;
        let mut w: f64 = 0.0;
        for (i, &v) in ids.iter().enumerate() {
            let (nw, nh) = sizes[v];
            h = h.max(nh);
            w += nw;
            if i + 1 < ids.len() {
                w += nodesep;
            }
        }
        rank_heights.push(h);
        rank_widths.push(w);
    }
    let max_rank_width = rank_widths.iter().copied().fold(0.0_f64, f64::max);

    let mut y_cursor: f64 = 0.0;
    for (rank_idx, ids) in layers.iter().enumerate() {
        let rank_h = rank_heights[rank_idx];
        let y = y_cursor + rank_h / 2.0;

        let mut x_cursor = (max_rank_width - rank_widths[rank_idx]) / 2.0;
        for &v in ids {
            let (nw, _) = sizes[v];
            centers[v] = Point {
                x: x_cursor + nw / 2.0,
                y,
            };
            x_cursor += nw + nodesep;
        }

        y_cursor += rank_h;
        if rank_idx + 1 < layers.len() {
            y_cursor += ranksep;
        }
    }

    (centers, max_rank_width, y_cursor)
}

/// Box size as seen by the top-to-bottom positioning pass.
pub fn oriented_size(rankdir: RankDir, width: f64, height: f64) -> (f64, f64) {
    match rankdir {
        RankDir::TB | RankDir::BT => (width, height),
        RankDir::LR | RankDir::RL => (height, width),
    }
}

/// Maps top-to-bottom centers into the requested direction.
///
/// `rank_extent` is the height of the top-to-bottom space (the rank axis).
pub fn undo_orientation(rankdir: RankDir, centers: &mut [Point], rank_extent: f64) {
    for p in centers.iter_mut() {
        *p = match rankdir {
            RankDir::TB => *p,
            RankDir::BT => Point {
                x: p.x,
                y: rank_extent - p.y,
            },
            RankDir::LR => Point { x: p.y, y: p.x },
            RankDir::RL => Point {
                x: rank_extent - p.y,
                y: p.x,
            },
        };
    }
}
