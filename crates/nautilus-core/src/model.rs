//! Node/edge model shared by the hierarchy analysis and the layout orchestrator.
//!
//! Field names follow the host's camelCase wire format so snapshots can be exchanged as JSON
//! without an intermediate DTO layer. Unknown host fields are kept in `extra` and round-trip
//! untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Wire id used for the implicit top-level container.
///
/// Only the serde impls below look at this string; everything inside the crates works with
/// [`ContainerKey::Root`].
pub const ROOT_SENTINEL: &str = "__root__";

/// Insertion-ordered node lookup table.
pub type NodeMap = IndexMap<String, Node>;

/// Identifies a layout scope: either the top level or a real container node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKey {
    Root,
    Node(String),
}

impl ContainerKey {
    pub fn node(id: impl Into<String>) -> Self {
        Self::Node(id.into())
    }

    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Node(id) => Some(id.as_str()),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    pub fn from_wire(s: &str) -> Self {
        if s == ROOT_SENTINEL {
            Self::Root
        } else {
            Self::Node(s.to_string())
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Root => ROOT_SENTINEL,
            Self::Node(id) => id.as_str(),
        }
    }
}

impl From<Option<&str>> for ContainerKey {
    fn from(parent: Option<&str>) -> Self {
        match parent {
            Some(id) => Self::Node(id.to_string()),
            None => Self::Root,
        }
    }
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for ContainerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for ContainerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TB => "TB",
            Self::BT => "BT",
            Self::LR => "LR",
            Self::RL => "RL",
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TB" | "TD" | "DOWN" => Ok(Self::TB),
            "BT" | "UP" => Ok(Self::BT),
            "LR" | "RIGHT" => Ok(Self::LR),
            "RL" | "LEFT" => Ok(Self::RL),
            _ => Err(()),
        }
    }
}

/// Side of a box an edge endpoint attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Size-styling fields consumed by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Per-container override of the request direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_direction: Option<Direction>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(deserialize_with = "node_id_from_wire")]
    pub id: String,
    #[serde(
        default,
        deserialize_with = "parent_id_from_wire",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "is_default_style")]
    pub style: NodeStyle,
    #[serde(default, skip_serializing_if = "is_default_data")]
    pub data: NodeData,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            position: Position::default(),
            width: None,
            height: None,
            hidden: false,
            style: NodeStyle::default(),
            data: NodeData::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_layout_direction(mut self, direction: Direction) -> Self {
        self.data.layout_direction = Some(direction);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The scope this node is laid out in.
    pub fn parent_key(&self) -> ContainerKey {
        ContainerKey::from(self.parent_id.as_deref())
    }

    /// Explicit size, falling back to the given defaults per axis.
    pub fn size_or(&self, default_width: f64, default_height: f64) -> Size {
        Size {
            width: self.width.unwrap_or(default_width),
            height: self.height.unwrap_or(default_height),
        }
    }

    /// Writes a computed container size onto both the numeric fields and the style fields.
    pub fn set_size(&mut self, size: Size) {
        self.width = Some(size.width);
        self.height = Some(size.height);
        self.style.width = Some(size.width);
        self.style.height = Some(size.height);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<HandleSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<HandleSide>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_handles(mut self, source: Option<HandleSide>, target: Option<HandleSide>) -> Self {
        self.source_handle = source;
        self.target_handle = target;
        self
    }
}

/// Builds the lookup table, keeping the first position of each id and the last value.
pub fn node_map<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> NodeMap {
    let mut out = NodeMap::new();
    for n in nodes {
        if n.id == ROOT_SENTINEL {
            tracing::warn!(node_id = %n.id, "node id collides with the top-level wire id");
        }
        if out.insert(n.id.clone(), n.clone()).is_some() {
            tracing::debug!(node_id = %n.id, "duplicate node id; last definition wins");
        }
    }
    out
}

fn node_id_from_wire<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let id = String::deserialize(deserializer)?;
    if id == ROOT_SENTINEL {
        return Err(serde::de::Error::custom(format!(
            "node id `{ROOT_SENTINEL}` is reserved for the top level"
        )));
    }
    Ok(id)
}

fn parent_id_from_wire<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| s != ROOT_SENTINEL))
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_default_style(v: &NodeStyle) -> bool {
    *v == NodeStyle::default()
}

fn is_default_data(v: &NodeData) -> bool {
    *v == NodeData::default()
}
