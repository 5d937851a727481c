#![allow(dead_code)]

use futures::FutureExt;
use futures::future::BoxFuture;
use nautilus_layout::{
    CancelToken, EngineError, EngineOutput, EngineRequest, LayoutEngine, layout_layered,
};
use std::sync::Mutex;

/// Records the `(id, width)` pairs of every request and lays children out in a row.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<Vec<(String, Option<f64>)>>>,
}

impl RecordingEngine {
    pub fn calls(&self) -> Vec<Vec<(String, Option<f64>)>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_ids(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .map(|call| call.into_iter().map(|(id, _)| id).collect())
            .collect()
    }
}

impl LayoutEngine for RecordingEngine {
    fn name(&self) -> &str {
        "recording"
    }

    fn calculate(&self, request: EngineRequest) -> BoxFuture<'_, Result<EngineOutput, EngineError>> {
        self.calls.lock().unwrap().push(
            request
                .nodes
                .iter()
                .map(|n| (n.id.clone(), n.width))
                .collect(),
        );
        let mut nodes = request.nodes;
        for (i, node) in nodes.iter_mut().enumerate() {
            node.position.x = 10.0 + i as f64 * 110.0;
            node.position.y = 10.0;
        }
        futures::future::ready(Ok(EngineOutput {
            nodes,
            edges: request.edges,
            width: 100.0,
            height: 50.0,
        }))
        .boxed()
    }
}

pub struct FailingEngine;

impl LayoutEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn calculate(&self, _request: EngineRequest) -> BoxFuture<'_, Result<EngineOutput, EngineError>> {
        futures::future::ready(Err(EngineError::new("boom"))).boxed()
    }
}

/// Cancels `token` while computing, like a newer request arriving mid-flight.
pub struct CancellingEngine {
    pub token: CancelToken,
}

impl LayoutEngine for CancellingEngine {
    fn name(&self) -> &str {
        "cancelling"
    }

    fn calculate(&self, request: EngineRequest) -> BoxFuture<'_, Result<EngineOutput, EngineError>> {
        self.token.cancel();
        futures::future::ready(Ok(layout_layered(request))).boxed()
    }
}
