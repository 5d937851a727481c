//! Per-request layout configuration.
//!
//! Hosts hand in loosely typed JSON (defaults, document overrides, CLI flags) which is merged as
//! values first and only then resolved into [`LayoutOptions`].

use crate::error::{Error, Result};
use crate::model::Direction;
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig(Value);

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl LayoutConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn defaults() -> Self {
        Self(json!({
            "direction": "TB",
            "margin": 20.0,
            "spacing": {
                "node": 50.0,
                "layer": 50.0
            },
            "defaultSize": {
                "width": 172.0,
                "height": 36.0
            },
            "includeHidden": false,
            "engine": "layered"
        }))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    /// Writes `value` at `dotted_path`, replacing non-object intermediates with objects.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let mut cur = &mut self.0;
        for segment in dotted_path.split('.') {
            if !cur.is_object() {
                *cur = Value::Object(Map::new());
            }
            let Value::Object(map) = cur else {
                return;
            };
            cur = map.entry(segment).or_insert(Value::Null);
        }
        *cur = value;
    }

    /// Merges `other` over this config: objects merge per key, anything else replaces.
    pub fn deep_merge(&mut self, other: &Value) {
        merge_into(&mut self.0, other);
    }
}

fn merge_into(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                if let Some(slot) = base_map.get_mut(key) {
                    merge_into(slot, in_value);
                } else {
                    base_map.insert(key.clone(), in_value.clone());
                }
            }
        }
        (slot, _) => *slot = incoming.clone(),
    }
}

/// Typed view of a [`LayoutConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub direction: Direction,
    pub margin: f64,
    pub node_spacing: f64,
    pub layer_spacing: f64,
    pub default_width: f64,
    pub default_height: f64,
    pub include_hidden: bool,
    /// Engine name; `None` selects the registry default.
    pub engine: Option<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::TB,
            margin: 20.0,
            node_spacing: 50.0,
            layer_spacing: 50.0,
            default_width: 172.0,
            default_height: 36.0,
            include_hidden: false,
            engine: None,
        }
    }
}

impl LayoutOptions {
    /// Resolves a config; keys that are absent keep their [`LayoutOptions::default`] value.
    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        let mut opts = Self::default();

        if let Some(v) = config.get("direction") {
            opts.direction = v
                .as_str()
                .and_then(|s| s.parse::<Direction>().ok())
                .ok_or_else(|| invalid("direction", "expected one of TB, BT, LR, RL"))?;
        }

        opts.margin = non_negative(config, "margin", opts.margin)?;
        opts.node_spacing = non_negative(config, "spacing.node", opts.node_spacing)?;
        opts.layer_spacing = non_negative(config, "spacing.layer", opts.layer_spacing)?;
        opts.default_width = non_negative(config, "defaultSize.width", opts.default_width)?;
        opts.default_height = non_negative(config, "defaultSize.height", opts.default_height)?;

        if let Some(v) = config.get("includeHidden") {
            opts.include_hidden = v
                .as_bool()
                .ok_or_else(|| invalid("includeHidden", "expected a boolean"))?;
        }

        if let Some(v) = config.get("engine") {
            match v {
                Value::Null => opts.engine = None,
                Value::String(s) if !s.trim().is_empty() => opts.engine = Some(s.clone()),
                _ => return Err(invalid("engine", "expected a non-empty string")),
            }
        }

        Ok(opts)
    }
}

fn non_negative(config: &LayoutConfig, path: &str, fallback: f64) -> Result<f64> {
    let Some(v) = config.get(path) else {
        return Ok(fallback);
    };
    match v.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(invalid(path, "expected a finite, non-negative number")),
    }
}

fn invalid(path: &str, message: &str) -> Error {
    Error::InvalidConfig {
        path: path.to_string(),
        message: message.to_string(),
    }
}
