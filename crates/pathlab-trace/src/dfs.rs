//! Recursive depth-first search with an explicit mirror of the call stack.

use std::collections::BTreeSet;

use pathlab_graph::{Graph, NodeId};

use crate::recorder::Recorder;
use crate::ProgramPoint;

struct Dfs<'a, 'g> {
    graph: &'g Graph,
    rec: &'a mut Recorder<'g>,
    visited: BTreeSet<NodeId>,
    stack: Vec<NodeId>,
}

pub(crate) fn run<'g>(graph: &'g Graph, start: NodeId, rec: &mut Recorder<'g>) {
    let mut dfs = Dfs {
        graph,
        rec,
        visited: BTreeSet::new(),
        stack: vec![start],
    };

    dfs.rec.record(
        ProgramPoint::Initialize,
        None,
        dfs.stack.iter().copied(),
        &dfs.visited,
        "Initialize search".into(),
        format!("Push '{}' onto the stack.", dfs.rec.label(start)),
    );

    dfs.rec.settle(start, 0, None);
    dfs.enter(start);
}

impl Dfs<'_, '_> {
    fn enter(&mut self, u: NodeId) {
        self.visited.insert(u);
        self.rec.record(
            ProgramPoint::Visit,
            Some(u),
            self.stack.iter().copied(),
            &self.visited,
            format!("Visiting {}", self.rec.label(u)),
            "Dive deeper into this branch.".into(),
        );

        let depth = self.rec.cost(u).unwrap_or(0);
        let graph = self.graph;
        for hop in graph.neighbors(u) {
            // Checked per iteration: an earlier sibling's subtree may have
            // reached this neighbor already.
            if self.visited.contains(&hop.node) {
                continue;
            }
            self.stack.push(hop.node);
            self.rec.settle(hop.node, depth + 1, Some(u));
            self.enter(hop.node);
            self.stack.pop();

            self.rec.record(
                ProgramPoint::Backtrack,
                Some(u),
                self.stack.iter().copied(),
                &self.visited,
                format!("Backtrack to {}", self.rec.label(u)),
                format!(
                    "'{}' is exhausted; move back up to '{}'.",
                    self.rec.label(hop.node),
                    self.rec.label(u)
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use pathlab_graph::{fixtures, Edge, Graph, Node, NodeId};

    use crate::{generate, Algorithm, ProgramPoint};

    #[test]
    fn visit_frontier_holds_the_full_stack() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Dfs).unwrap();

        let visit_h = trace
            .steps()
            .iter()
            .find(|s| s.program_point == ProgramPoint::Visit && s.current == Some(NodeId(7)))
            .unwrap();
        // a -> b -> d -> h
        assert_eq!(visit_h.frontier, vec![NodeId(0), NodeId(1), NodeId(3), NodeId(7)]);
    }

    #[test]
    fn backtrack_pops_the_child() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Dfs).unwrap();

        let last = trace.steps().last().unwrap();
        assert_eq!(last.program_point, ProgramPoint::Backtrack);
        assert_eq!(last.current, Some(NodeId(0)));
        assert_eq!(last.frontier, vec![NodeId(0)]);
        assert_eq!(last.message, "Backtrack to a");
    }

    #[test]
    fn cycle_visits_each_node_once() {
        let nodes = (0..4).map(|i| Node::new(i, i.to_string())).collect();
        let edges = vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 0),
            Edge::new(0, 2),
        ];
        let graph = Graph::new(nodes, edges).unwrap();
        let trace = generate(&graph, Algorithm::Dfs).unwrap();

        let order = trace.visit_order();
        assert_eq!(order, vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3)]);

        let backtracks = trace
            .steps()
            .iter()
            .filter(|s| s.program_point == ProgramPoint::Backtrack)
            .count();
        assert_eq!(backtracks, 3);
    }
}
