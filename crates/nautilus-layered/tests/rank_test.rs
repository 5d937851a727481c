use nautilus_layered::ports::RankEdge;
use nautilus_layered::{acyclic, rank};

fn flow(v: usize, w: usize) -> RankEdge {
    RankEdge {
        v,
        w,
        minlen: 1,
        sibling: false,
    }
}

fn sibling(v: usize, w: usize) -> RankEdge {
    RankEdge {
        v,
        w,
        minlen: 0,
        sibling: true,
    }
}

fn assert_respects_minlen(ranks: &[usize], edges: &[RankEdge]) {
    for e in edges {
        assert!(
            ranks[e.w] >= ranks[e.v] + e.minlen,
            "edge {} -> {} violates minlen {}: {} vs {}",
            e.v,
            e.w,
            e.minlen,
            ranks[e.w],
            ranks[e.v]
        );
    }
}

#[test]
fn longest_path_respects_minlen_on_a_diamond() {
    // a -> b -> d, a -> c -> d, a -> d
    let edges = vec![flow(0, 1), flow(1, 3), flow(0, 2), flow(2, 3), flow(0, 3)];
    let ranks = rank::longest_path(4, &edges);
    assert_eq!(ranks, vec![0, 1, 1, 2]);
    assert_respects_minlen(&ranks, &edges);
}

#[test]
fn acyclic_reverses_the_back_edge_of_a_triangle() {
    let mut edges = vec![flow(0, 1), flow(1, 2), flow(2, 0)];
    assert_eq!(acyclic::feedback_arcs(3, &edges), vec![2]);
    assert_eq!(acyclic::run(3, &mut edges), 1);
    assert_eq!((edges[2].v, edges[2].w), (0, 2));
    let ranks = rank::longest_path(3, &edges);
    assert_respects_minlen(&ranks, &edges);
}

#[test]
fn acyclic_leaves_dags_alone() {
    let edges = vec![flow(0, 1), flow(0, 2), flow(1, 2)];
    assert!(acyclic::feedback_arcs(3, &edges).is_empty());
}

#[test]
fn sibling_edges_are_pulled_onto_a_shared_rank() {
    // 0 -> 1 (flow), 2 -~ 1 (sibling): 2 starts at rank 0 and moves down next to 1.
    let edges = vec![flow(0, 1), sibling(2, 1)];
    let mut ranks = rank::longest_path(3, &edges);
    assert_eq!(ranks, vec![0, 1, 0]);
    rank::tighten_siblings(&mut ranks, &edges);
    assert_eq!(ranks, vec![0, 1, 1]);
    assert_respects_minlen(&ranks, &edges);
}

#[test]
fn sibling_compaction_never_breaks_outgoing_constraints() {
    // 2 -> 3 (flow) keeps 2 above 3, so the sibling pull towards 1 is refused.
    let edges = vec![flow(0, 1), flow(0, 3), sibling(2, 1), flow(2, 3)];
    let mut ranks = rank::longest_path(4, &edges);
    rank::tighten_siblings(&mut ranks, &edges);
    assert_respects_minlen(&ranks, &edges);
    assert_eq!(ranks[2], 0);
}

#[test]
fn compact_drops_empty_ranks() {
    let mut ranks = vec![0, 4, 2, 4];
    rank::compact(&mut ranks);
    assert_eq!(ranks, vec![0, 2, 1, 2]);
    assert_eq!(rank::layers(&ranks), vec![vec![0], vec![2], vec![1, 3]]);
}
