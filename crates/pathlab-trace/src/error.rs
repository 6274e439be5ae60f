//! Error types for trace generation.

use pathlab_graph::NodeId;
use thiserror::Error;

use crate::Algorithm;

/// Result type for trace generation.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Configuration errors. Raised before any step is produced; a trace is
/// either generated in full or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// The graph has no nodes.
    #[error("cannot search an empty graph")]
    EmptyGraph,

    /// The configured start node is not in the graph.
    #[error("start node {0} does not exist")]
    UnknownStart(NodeId),

    /// The graph's goal node is not in the graph.
    #[error("goal node {0} does not exist")]
    UnknownGoal(NodeId),

    /// The algorithm needs a goal and the graph designates none.
    #[error("{0} requires the graph to designate a goal node")]
    MissingGoal(Algorithm),

    /// The algorithm needs heuristic values and no node carries one.
    #[error("{0} requires heuristic values on the graph's nodes")]
    MissingHeuristic(Algorithm),
}
