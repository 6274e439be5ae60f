//! The immutable result of one generation run.

use pathlab_graph::{Cost, NodeId};
use serde::{Deserialize, Serialize};

use crate::{Algorithm, ProgramPoint, Step};

/// Ordered, finite step sequence for one (graph, algorithm) pair.
///
/// Besides the steps, a trace keeps the search's final per-node bookkeeping:
/// the best cost found (hop depth for BFS, tree depth for DFS, path cost for
/// Dijkstra and A*) and the predecessor on that path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    algorithm: Algorithm,
    start: NodeId,
    steps: Vec<Step>,
    costs: Vec<Option<Cost>>,
    parents: Vec<Option<NodeId>>,
}

impl Trace {
    pub(crate) fn new(
        algorithm: Algorithm,
        start: NodeId,
        steps: Vec<Step>,
        costs: Vec<Option<Cost>>,
        parents: Vec<Option<NodeId>>,
    ) -> Self {
        Self {
            algorithm,
            start,
            steps,
            costs,
            parents,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step, `None` for an empty trace.
    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    /// Nodes in the order they were visited (BFS/DFS) or finalized
    /// (Dijkstra/A*).
    pub fn visit_order(&self) -> Vec<NodeId> {
        self.steps
            .iter()
            .filter(|s| s.program_point == ProgramPoint::Visit)
            .filter_map(|s| s.current)
            .collect()
    }

    /// Best cost recorded for `node`, `None` if the search never reached it.
    pub fn cost_to(&self, node: NodeId) -> Option<Cost> {
        self.costs.get(node.index()).copied().flatten()
    }

    /// Path from the start to `node` through recorded predecessors.
    pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
        self.cost_to(node)?;
        let mut path = vec![node];
        let mut cursor = node;
        while let Some(parent) = self.parents.get(cursor.index()).copied().flatten() {
            path.push(parent);
            cursor = parent;
            if path.len() > self.parents.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}
