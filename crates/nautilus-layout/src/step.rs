//! Single-container layout step.

use crate::cancel::CancelToken;
use crate::engine::{EngineRequest, LayoutEngine};
use crate::error::{Error, Result};
use nautilus_core::{ContainerKey, EdgeProjection, LayoutOptions, Node, NodeMap, ParentIndex, Size};

/// Read-only inputs shared by every step of one request.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub index: &'a ParentIndex,
    pub nodes: &'a NodeMap,
    pub projection: &'a EdgeProjection,
    pub options: &'a LayoutOptions,
}

/// The outcome of one step, not yet written to the node map.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerLayout {
    pub container: ContainerKey,
    /// Direct children with their new positions.
    pub children: Vec<Node>,
    /// Size to write onto the container node; `None` for the top level, an unresolved container
    /// or a non-positive engine size.
    pub size: Option<Size>,
}

impl ContainerLayout {
    fn empty(container: &ContainerKey) -> Self {
        Self {
            container: container.clone(),
            children: Vec::new(),
            size: None,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.children.is_empty() && self.size.is_none()
    }

    /// Writes child positions and the container size into `nodes`.
    ///
    /// Returns the ids whose position or size actually changed.
    pub fn apply(&self, nodes: &mut NodeMap) -> Vec<String> {
        let mut touched = Vec::new();
        for child in &self.children {
            let Some(node) = nodes.get_mut(&child.id) else {
                continue;
            };
            if node.position != child.position {
                node.position = child.position;
                touched.push(child.id.clone());
            }
        }

        let (Some(size), Some(id)) = (self.size, self.container.node_id()) else {
            return touched;
        };
        if let Some(node) = nodes.get_mut(id) {
            let before = (node.width, node.height, node.style.width, node.style.height);
            node.set_size(size);
            if before != (node.width, node.height, node.style.width, node.style.height) {
                touched.push(id.to_string());
            }
        }
        touched
    }
}

/// Lays out the direct children of `container` with `engine`.
///
/// Nothing is written; the caller applies the returned [`ContainerLayout`] once it is safe to do
/// so. The token is checked before the engine runs and again before its result is used.
pub async fn layout_container(
    engine: &dyn LayoutEngine,
    container: &ContainerKey,
    ctx: &LayoutContext<'_>,
    cancel: &CancelToken,
) -> Result<ContainerLayout> {
    cancel.check()?;

    let Some(child_ids) = ctx.index.children(container).filter(|c| !c.is_empty()) else {
        return Ok(ContainerLayout::empty(container));
    };

    let children: Vec<Node> = child_ids
        .iter()
        .filter_map(|id| {
            let node = ctx.nodes.get(id);
            if node.is_none() {
                tracing::debug!(container = %container, child = %id, "child does not resolve; dropping");
            }
            node.cloned()
        })
        .collect();

    let container_node = container.node_id().and_then(|id| ctx.nodes.get(id));
    if container.node_id().is_some() && container_node.is_none() {
        tracing::debug!(container = %container, "container node is missing; its size will not be written");
    }

    let direction = container_node
        .and_then(|n| n.data.layout_direction)
        .unwrap_or(ctx.options.direction);

    let edges = ctx
        .projection
        .for_container(container)
        .iter()
        .map(|p| p.edge.clone())
        .collect();

    tracing::debug!(
        container = %container,
        engine = engine.name(),
        children = children.len(),
        direction = direction.as_str(),
        "laying out container"
    );

    let request = EngineRequest::new(children, edges, direction, ctx.options);
    let output = engine.calculate(request).await.map_err(|e| Error::Engine {
        engine: engine.name().to_string(),
        container: container.clone(),
        message: e.message,
    })?;

    cancel.check()?;

    let size = Size {
        width: output.width,
        height: output.height,
    };
    let size = (container_node.is_some() && size.is_positive()).then_some(size);

    let mut children = output.nodes;
    children.retain(|n| child_ids.contains(&n.id));

    Ok(ContainerLayout {
        container: container.clone(),
        children,
        size,
    })
}
