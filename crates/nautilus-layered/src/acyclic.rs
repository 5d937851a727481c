//! Break cycles by reversing a DFS feedback arc set.
//!
//! Nodes are visited in insertion order and out-edges in edge order, so the same input always
//! reverses the same edges.

use crate::ports::RankEdge;

/// Returns the indices (into `edges`) of the edges that close a cycle.
pub fn feedback_arcs(node_count: usize, edges: &[RankEdge]) -> Vec<usize> {
    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for (i, e) in edges.iter().enumerate() {
        if e.v != e.w && e.v < node_count && e.w < node_count {
            out_edges[e.v].push(i);
        }
    }

    let mut fas: Vec<usize> = Vec::new();
    let mut visited = vec![false; node_count];
    let mut on_stack = vec![false; node_count];

    for start in 0..node_count {
        if visited[start] {
            continue;
        }
        // (node, next out-edge cursor)
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        visited[start] = true;
        on_stack[start] = true;

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let Some(&ei) = out_edges[v].get(top.1) else {
                on_stack[v] = false;
                stack.pop();
                continue;
            };
            top.1 += 1;

            let w = edges[ei].w;
            if on_stack[w] {
                fas.push(ei);
            } else if !visited[w] {
                visited[w] = true;
                on_stack[w] = true;
                stack.push((w, 0));
            }
        }
    }

    fas.sort_unstable();
    fas
}

/// Reverses every feedback arc in place; returns how many edges were flipped.
pub fn run(node_count: usize, edges: &mut [RankEdge]) -> usize {
    let fas = feedback_arcs(node_count, edges);
    for &i in &fas {
        let e = &mut edges[i];
        (e.v, e.w) = (e.w, e.v);
    }
    fas.len()
}
