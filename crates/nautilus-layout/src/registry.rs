use crate::engine::LayoutEngine;
use crate::error::{Error, Result};
use crate::layered::{LAYERED_ENGINE, LayeredEngine};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Engine lookup owned by the caller; there is no process-wide default.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: IndexMap<String, Arc<dyn LayoutEngine>>,
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.engines.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        reg.insert(LayeredEngine);
        reg
    }

    /// Registers `engine` under its own name, replacing any engine with that name.
    pub fn insert<E: LayoutEngine + 'static>(&mut self, engine: E) {
        self.insert_shared(Arc::new(engine));
    }

    pub fn insert_shared(&mut self, engine: Arc<dyn LayoutEngine>) {
        self.engines.insert(engine.name().to_string(), engine);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn LayoutEngine>> {
        self.engines.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Looks up `name`, falling back to the layered engine when no name is given.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<dyn LayoutEngine>> {
        let name = name.unwrap_or(LAYERED_ENGINE);
        self.get(name).ok_or_else(|| Error::UnknownEngine {
            name: name.to_string(),
        })
    }
}
