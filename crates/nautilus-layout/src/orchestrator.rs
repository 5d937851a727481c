//! Hierarchical layout orchestration.
//!
//! Every request works on an owned copy of the caller's nodes. Results of a batch of concurrent
//! container steps are written only after the whole batch has finished, so a failed or cancelled
//! request never exposes a partially updated node set.

use crate::cancel::CancelToken;
use crate::engine::LayoutEngine;
use crate::error::{Error, Result};
use crate::registry::EngineRegistry;
use crate::step::{LayoutContext, layout_container};
use futures::future::join_all;
use indexmap::IndexSet;
use nautilus_core::{
    ContainerKey, Edge, EdgeProjection, LayoutOptions, Node, NodeMap, ParentIndex, Snapshot,
    build_hierarchy, containers_for_selection, node_map, project_edges,
};
use std::sync::Arc;
use tracing::Instrument;

/// One layout request: the host's current snapshot plus per-request options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutInput {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub options: LayoutOptions,
}

impl LayoutInput {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            options: LayoutOptions::default(),
        }
    }

    pub fn from_snapshot(snapshot: Snapshot, options: LayoutOptions) -> Self {
        Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
            options,
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    Applied {
        /// Every input node in input order, updated where a step touched it. Duplicate ids are
        /// kept; they share the position laid out for that id.
        nodes: Vec<Node>,
        /// The original edge list.
        edges: Vec<Edge>,
        /// Ids whose position or size changed, in write order.
        touched: Vec<String>,
        /// Scopes in processing order.
        containers: Vec<ContainerKey>,
    },
    /// The request was superseded; carries the input unchanged.
    Cancelled { nodes: Vec<Node>, edges: Vec<Edge> },
}

impl LayoutOutcome {
    pub fn nodes(&self) -> &[Node] {
        match self {
            Self::Applied { nodes, .. } | Self::Cancelled { nodes, .. } => nodes,
        }
    }

    pub fn edges(&self) -> &[Edge] {
        match self {
            Self::Applied { edges, .. } | Self::Cancelled { edges, .. } => edges,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes().iter().find(|n| n.id == id)
    }

    fn cancelled(input: &LayoutInput) -> Self {
        Self::Cancelled {
            nodes: input.nodes.clone(),
            edges: input.edges.clone(),
        }
    }
}

/// Structures derived once per request from the input snapshot.
struct Prepared {
    engine: Arc<dyn LayoutEngine>,
    nodes: NodeMap,
    index: ParentIndex,
    projection: EdgeProjection,
}

#[derive(Debug, Clone)]
pub struct Orchestrator {
    registry: EngineRegistry,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::with_default_engines()
    }
}

impl Orchestrator {
    pub fn new(registry: EngineRegistry) -> Self {
        Self { registry }
    }

    pub fn with_default_engines() -> Self {
        Self::new(EngineRegistry::with_defaults())
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EngineRegistry {
        &mut self.registry
    }

    /// Lays out every container deepest-first, then the top level.
    pub async fn layout_all(
        &self,
        input: &LayoutInput,
        cancel: &CancelToken,
    ) -> Result<LayoutOutcome> {
        let span = tracing::debug_span!(
            "layout_all",
            nodes = input.nodes.len(),
            edges = input.edges.len()
        );
        let res = self.run_all(input, cancel).instrument(span).await;
        finish(input, res)
    }

    /// Lays out only the scopes a selection touches.
    pub async fn layout_selection(
        &self,
        input: &LayoutInput,
        selected: &[String],
        cancel: &CancelToken,
    ) -> Result<LayoutOutcome> {
        let span = tracing::debug_span!(
            "layout_selection",
            nodes = input.nodes.len(),
            selected = selected.len()
        );
        let res = self
            .run_selection(input, selected, cancel)
            .instrument(span)
            .await;
        finish(input, res)
    }

    /// Synchronous variant of [`Orchestrator::layout_all`].
    ///
    /// Blocks the current thread on the engine futures; intended for hosts without an executor.
    pub fn layout_all_sync(
        &self,
        input: &LayoutInput,
        cancel: &CancelToken,
    ) -> Result<LayoutOutcome> {
        futures::executor::block_on(self.layout_all(input, cancel))
    }

    /// Synchronous variant of [`Orchestrator::layout_selection`].
    pub fn layout_selection_sync(
        &self,
        input: &LayoutInput,
        selected: &[String],
        cancel: &CancelToken,
    ) -> Result<LayoutOutcome> {
        futures::executor::block_on(self.layout_selection(input, selected, cancel))
    }

    fn prepare(&self, input: &LayoutInput) -> Result<Prepared> {
        let engine = self.registry.resolve(input.options.engine.as_deref())?;
        let nodes = node_map(&input.nodes);
        let index = ParentIndex::build(&nodes);
        let projection = project_edges(&input.edges, &nodes);
        Ok(Prepared {
            engine,
            nodes,
            index,
            projection,
        })
    }

    async fn run_all(&self, input: &LayoutInput, cancel: &CancelToken) -> Result<LayoutOutcome> {
        let Prepared {
            engine,
            mut nodes,
            index,
            projection,
        } = self.prepare(input)?;

        let tree = build_hierarchy(&index, &nodes)?;
        let mut batches: Vec<Vec<ContainerKey>> = tree
            .depth_groups()
            .into_values()
            .rev()
            .map(|ids| ids.into_iter().map(ContainerKey::node).collect())
            .collect();
        batches.push(vec![ContainerKey::Root]);

        let mut touched = IndexSet::new();
        let mut containers = Vec::new();
        for batch in batches {
            let ctx = Batch {
                engine: engine.as_ref(),
                index: &index,
                projection: &projection,
                options: &input.options,
            };
            touched.extend(ctx.run(&batch, &mut nodes, cancel).await?);
            containers.extend(batch);
        }

        Ok(applied(input, &index, nodes, touched, containers))
    }

    async fn run_selection(
        &self,
        input: &LayoutInput,
        selected: &[String],
        cancel: &CancelToken,
    ) -> Result<LayoutOutcome> {
        let Prepared {
            engine,
            mut nodes,
            index,
            projection,
        } = self.prepare(input)?;

        let batch = containers_for_selection(selected.iter().map(String::as_str), &index, &nodes);
        tracing::debug!(
            containers = ?batch.iter().map(ContainerKey::as_wire).collect::<Vec<_>>(),
            "selection scoped to containers"
        );

        let ctx = Batch {
            engine: engine.as_ref(),
            index: &index,
            projection: &projection,
            options: &input.options,
        };
        let touched = ctx.run(&batch, &mut nodes, cancel).await?;

        Ok(applied(
            input,
            &index,
            nodes,
            touched.into_iter().collect(),
            batch,
        ))
    }
}

struct Batch<'a> {
    engine: &'a dyn LayoutEngine,
    index: &'a ParentIndex,
    projection: &'a EdgeProjection,
    options: &'a LayoutOptions,
}

impl Batch<'_> {
    /// Runs the steps for `keys` concurrently and applies them once all have succeeded.
    async fn run(
        &self,
        keys: &[ContainerKey],
        nodes: &mut NodeMap,
        cancel: &CancelToken,
    ) -> Result<Vec<String>> {
        cancel.check()?;

        let results = {
            let ctx = LayoutContext {
                index: self.index,
                nodes: &*nodes,
                projection: self.projection,
                options: self.options,
            };
            join_all(
                keys.iter()
                    .map(|key| layout_container(self.engine, key, &ctx, cancel)),
            )
            .await
        };
        let layouts = results.into_iter().collect::<Result<Vec<_>>>()?;

        let mut touched = Vec::new();
        for layout in &layouts {
            touched.extend(layout.apply(nodes));
        }
        Ok(touched)
    }
}

/// Rebuilds the output in input order, so duplicate ids each keep their own entry.
///
/// Every copy of an id takes the laid-out position; container copies also take the new size.
fn applied(
    input: &LayoutInput,
    index: &ParentIndex,
    nodes: NodeMap,
    touched: IndexSet<String>,
    containers: Vec<ContainerKey>,
) -> LayoutOutcome {
    let nodes = input
        .nodes
        .iter()
        .map(|original| {
            let mut node = original.clone();
            let Some(laid_out) = nodes.get(&original.id) else {
                return node;
            };
            node.position = laid_out.position;
            if index.is_container(&original.id) {
                node.width = laid_out.width;
                node.height = laid_out.height;
                node.style.width = laid_out.style.width;
                node.style.height = laid_out.style.height;
            }
            node
        })
        .collect();

    LayoutOutcome::Applied {
        nodes,
        edges: input.edges.clone(),
        touched: touched.into_iter().collect(),
        containers,
    }
}

fn finish(input: &LayoutInput, res: Result<LayoutOutcome>) -> Result<LayoutOutcome> {
    match res {
        Err(Error::Cancelled) => {
            tracing::debug!("layout request cancelled; returning input unchanged");
            Ok(LayoutOutcome::cancelled(input))
        }
        Err(err) => {
            tracing::error!(error = %err, "layout request failed; input left unchanged");
            Err(err)
        }
        ok => ok,
    }
}
