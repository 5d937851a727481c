//! Rank assignment.
//!
//! Longest-path ranking over an acyclic constraint set, followed by a compaction step that pulls
//! sibling-attached nodes onto a shared rank where the remaining constraints allow it.

use crate::ports::RankEdge;
use std::collections::VecDeque;

/// Assigns `rank[v]` so that every edge satisfies `rank[w] - rank[v] >= minlen`.
///
/// `edges` must already be acyclic (see [`crate::acyclic`]). Should a cycle slip through, the
/// nodes on it keep rank 0 rather than looping.
pub fn longest_path(node_count: usize, edges: &[RankEdge]) -> Vec<usize> {
    let mut indegree = vec![0usize; node_count];
    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (i, e) in edges.iter().enumerate() {
        if e.v == e.w {
            continue;
        }
        indegree[e.w] += 1;
        out_edges[e.v].push(i);
    }

    // Deterministic Kahn order: initial nodes in insertion order.
    let mut queue: VecDeque<usize> = (0..node_count).filter(|&v| indegree[v] == 0).collect();
    let mut rank = vec![0usize; node_count];

    while let Some(v) = queue.pop_front() {
        for &ei in &out_edges[v] {
            let e = edges[ei];
            let next = rank[v].saturating_add(e.minlen);
            if next > rank[e.w] {
                rank[e.w] = next;
            }
            indegree[e.w] = indegree[e.w].saturating_sub(1);
            if indegree[e.w] == 0 {
                queue.push_back(e.w);
            }
        }
    }

    rank
}

/// Moves the upstream end of each sibling edge down to its partner's rank when no outgoing
/// constraint forbids it.
pub fn tighten_siblings(rank: &mut [usize], edges: &[RankEdge]) {
    for e in edges.iter().filter(|e| e.sibling) {
        let (v, w) = (e.v, e.w);
        if rank[w] <= rank[v] {
            continue;
        }
        let target = rank[w];
        let allowed = edges
            .iter()
            .filter(|o| o.v == v)
            .all(|o| rank[o.w] >= target.saturating_add(o.minlen));
        if allowed {
            rank[v] = target;
        }
    }
}

/// Renumbers the used ranks as `0..n`, dropping empty ones.
///
/// Order between ranks is preserved, so constraints with `minlen <= 1` still hold.
pub fn compact(rank: &mut [usize]) {
    let mut used: Vec<usize> = rank.to_vec();
    used.sort_unstable();
    used.dedup();
    for r in rank.iter_mut() {
        if let Ok(pos) = used.binary_search(r) {
            *r = pos;
        }
    }
}

/// Ranks as layers of node indices, each layer in insertion order.
pub fn layers(rank: &[usize]) -> Vec<Vec<usize>> {
    let max_rank = rank.iter().copied().max().unwrap_or(0);
    let layer_count = if rank.is_empty() { 0 } else { max_rank + 1 };
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (v, &r) in rank.iter().enumerate() {
        out[r].push(v);
    }
    out
}
