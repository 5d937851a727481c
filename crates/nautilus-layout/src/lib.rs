#![forbid(unsafe_code)]

//! Hierarchical layout orchestration for nested diagrams.
//!
//! Containers are laid out bottom-up: each container's direct children are arranged by a pluggable
//! [`LayoutEngine`], and the reported bounding size becomes the container's own size before its
//! parent is processed. Edges that cross container boundaries are projected onto the scope of
//! their lowest common ancestor for the duration of one request only; the caller's edges are
//! always returned untouched.
//!
//! The API is runtime-agnostic: engines return boxed futures and no executor is required. The
//! `_sync` variants block on the current thread.

pub mod cancel;
pub mod engine;
pub mod error;
pub mod layered;
pub mod orchestrator;
pub mod registry;
pub mod step;

pub use cancel::{CancelToken, LayoutSession};
pub use engine::{EngineError, EngineOutput, EngineRequest, LayoutEngine};
pub use error::{Error, Result};
pub use layered::{LAYERED_ENGINE, LayeredEngine, layout_layered};
pub use orchestrator::{LayoutInput, LayoutOutcome, Orchestrator};
pub use registry::EngineRegistry;
pub use step::{ContainerLayout, LayoutContext, layout_container};
