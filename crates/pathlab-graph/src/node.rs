//! Node identity and per-node attributes.

use std::fmt;

use crate::Cost;

/// Dense, 0-based node identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct NodeId(pub usize);

impl NodeId {
    /// The node every search starts from unless told otherwise.
    pub const ROOT: Self = Self(0);

    /// Create from a raw index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layout position, only meaningful to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    /// Estimated remaining cost to the graph's goal. Read by A* only.
    #[cfg_attr(feature = "serde", serde(default, rename = "h", skip_serializing_if = "Option::is_none"))]
    pub heuristic: Option<Cost>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub position: Option<Point>,
}

impl Node {
    /// Create a node with a label and no heuristic or position.
    pub fn new(id: usize, label: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            label: label.into(),
            heuristic: None,
            position: None,
        }
    }

    /// Attach a heuristic estimate.
    #[must_use]
    pub fn with_heuristic(mut self, h: Cost) -> Self {
        self.heuristic = Some(h);
        self
    }

    /// Attach a layout position.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Point { x, y });
        self
    }

    /// Heuristic value, 0 when the node carries none.
    #[inline]
    pub fn h(&self) -> Cost {
        self.heuristic.unwrap_or(0)
    }
}
