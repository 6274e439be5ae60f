//! The atomic unit of a trace.

use std::collections::BTreeSet;

use pathlab_graph::NodeId;
use serde::{Deserialize, Serialize};

/// Semantic phase of the algorithm a step belongs to.
///
/// A pseudocode display maps this onto a line; see
/// [`Algorithm::line_for`](crate::Algorithm::line_for).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramPoint {
    /// Frontier seeded with the start node.
    Initialize,
    /// A node was taken off the frontier (popped, entered, finalized).
    Visit,
    /// A neighbor was discovered or its best-known cost was relaxed.
    Discover,
    /// Depth-first search returned from a child to its parent.
    Backtrack,
}

/// One observable micro-event of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Pending nodes in frontier order (queue, stack or priority collection).
    pub frontier: Vec<NodeId>,
    /// Nodes marked visited (BFS/DFS) or finalized (Dijkstra/A*).
    pub visited: BTreeSet<NodeId>,
    /// Node being processed; `None` only for the initialization step.
    pub current: Option<NodeId>,
    pub program_point: ProgramPoint,
    /// Short description, e.g. "Visiting b".
    pub message: String,
    /// Longer rationale for the event.
    pub explanation: String,
}

impl Step {
    pub fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }
}
