
use crate::{Edge, Node, NodeMap, node_map};

pub(crate) fn nodes(list: &[Node]) -> NodeMap {
    node_map(list)
}

pub(crate) fn leaf(id: &str, parent: Option<&str>) -> Node {
    let n = Node::new(id);
    match parent {
        Some(p) => n.with_parent(p),
        None => n,
    }
}

pub(crate) fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge::new(id, source, target)
}

/// `A ⊃ B ⊃ x`, plus a top-level `y`.
pub(crate) fn nested_with_top_level_peer() -> NodeMap {
    nodes(&[
        leaf("A", None),
        leaf("B", Some("A")),
        leaf("x", Some("B")),
        leaf("y", None),
    ])
}

/// Random forests: node `i` picks a parent among `0..i` or none, so chains are acyclic.
pub(crate) fn forest(parents: &[Option<usize>]) -> NodeMap {
    let list: Vec<Node> = parents
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let n = Node::new(format!("n{i}"));
            match p {
                Some(p) if *p < i => n.with_parent(format!("n{p}")),
                _ => n,
            }
        })
        .collect();
    nodes(&list)
}
