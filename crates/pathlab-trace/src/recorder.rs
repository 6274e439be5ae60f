//! Append-only step recording shared by every search.

use std::collections::BTreeSet;

use pathlab_graph::{Cost, Graph, NodeId};

use crate::{ProgramPoint, Step};

/// Collects steps plus the per-node bookkeeping a [`Trace`](crate::Trace)
/// reports once the search finishes.
pub(crate) struct Recorder<'g> {
    graph: &'g Graph,
    steps: Vec<Step>,
    pub(crate) costs: Vec<Option<Cost>>,
    pub(crate) parents: Vec<Option<NodeId>>,
}

impl<'g> Recorder<'g> {
    pub(crate) fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            steps: Vec::new(),
            costs: vec![None; graph.node_count()],
            parents: vec![None; graph.node_count()],
        }
    }

    pub(crate) fn label(&self, node: NodeId) -> &'g str {
        self.graph.label(node)
    }

    pub(crate) fn cost(&self, node: NodeId) -> Option<Cost> {
        self.costs[node.index()]
    }

    pub(crate) fn settle(&mut self, node: NodeId, cost: Cost, parent: Option<NodeId>) {
        self.costs[node.index()] = Some(cost);
        self.parents[node.index()] = parent;
    }

    pub(crate) fn record(
        &mut self,
        program_point: ProgramPoint,
        current: Option<NodeId>,
        frontier: impl IntoIterator<Item = NodeId>,
        visited: &BTreeSet<NodeId>,
        message: String,
        explanation: String,
    ) {
        self.steps.push(Step {
            frontier: frontier.into_iter().collect(),
            visited: visited.clone(),
            current,
            program_point,
            message,
            explanation,
        });
    }

    pub(crate) fn finish(self) -> (Vec<Step>, Vec<Option<Cost>>, Vec<Option<NodeId>>) {
        (self.steps, self.costs, self.parents)
    }
}
