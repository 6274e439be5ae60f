//! Error types for graph construction.

use thiserror::Error;

use crate::NodeId;

/// Reasons a node/edge set does not form a valid [`Graph`](crate::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Node ids must be exactly `0..n` in order.
    #[error("node at position {position} has id {id}, ids must be dense and 0-based")]
    NonDenseId { position: usize, id: NodeId },

    /// An edge names a node that does not exist.
    #[error("edge {edge} references unknown node {node}")]
    UnknownNode { edge: usize, node: NodeId },

    /// An edge connects a node to itself.
    #[error("edge {edge} is a self-loop on node {node}")]
    SelfLoop { edge: usize, node: NodeId },

    /// Two edges connect the same unordered pair.
    #[error("edge {edge} duplicates the edge between {u} and {v}")]
    DuplicateEdge { edge: usize, u: NodeId, v: NodeId },
}
