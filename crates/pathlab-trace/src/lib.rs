//! Pathlab Trace Generation
//!
//! Turns a graph and an algorithm selector into a [`Trace`]: the complete,
//! ordered list of [`Step`]s a replay walks through.
//!
//! # Determinism
//!
//! [`generate`] is a pure function. Two calls with the same graph and
//! algorithm yield identical traces, down to the serialized bytes. Two rules
//! pick the one canonical trace out of all valid ones:
//!
//! - Neighbors are considered in ascending node-id order.
//! - Priority collections sort stably, so equal priorities pop in insertion
//!   order.
//!
//! # Algorithms
//!
//! | algorithm | frontier | steps |
//! |-----------|----------|-------|
//! | BFS | FIFO queue | initialize, visit, discover |
//! | DFS | stack (mirrors recursion) | initialize, visit, backtrack |
//! | Dijkstra | re-sorted list, stale entries dropped | initialize, visit, discover (relax) |
//! | A* | as Dijkstra, keyed by g + h, stops at goal | initialize, visit, discover (relax) |
//!
//! Dijkstra and A* assume non-negative edge weights. A* reports a shortest
//! path only if the heuristic is admissible; neither precondition is checked.
//!
//! # Usage
//!
//! ```
//! use pathlab_graph::fixtures;
//! use pathlab_trace::{generate, Algorithm};
//!
//! let network = fixtures::network().unwrap();
//! let trace = generate(&network, Algorithm::Dijkstra).unwrap();
//! assert_eq!(trace.cost_to(network.goal().unwrap()), Some(7));
//! ```

mod algorithm;
mod best_first;
mod bfs;
mod dfs;
mod error;
mod recorder;
mod step;
mod trace;

pub use algorithm::{Algorithm, GraphKind, ParseAlgorithmError};
pub use error::{Result, TraceError};
pub use step::{ProgramPoint, Step};
pub use trace::Trace;

use pathlab_graph::{Graph, NodeId};
use tracing::debug;

use best_first::Ranking;
use recorder::Recorder;

/// Generation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    /// Node the search starts from. Default: node 0.
    pub start: NodeId,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            start: NodeId::ROOT,
        }
    }
}

impl TraceConfig {
    /// Start the search somewhere other than node 0.
    #[must_use]
    pub fn with_start(mut self, start: impl Into<NodeId>) -> Self {
        self.start = start.into();
        self
    }
}

/// Generate the trace of `algorithm` over `graph`, starting from node 0.
pub fn generate(graph: &Graph, algorithm: Algorithm) -> Result<Trace> {
    generate_with(graph, algorithm, &TraceConfig::default())
}

/// Generate the trace of `algorithm` over `graph` with explicit options.
///
/// All configuration errors are reported before any step is recorded.
pub fn generate_with(graph: &Graph, algorithm: Algorithm, config: &TraceConfig) -> Result<Trace> {
    let start = config.start;
    validate(graph, algorithm, start)?;

    let mut rec = Recorder::new(graph);
    match algorithm {
        Algorithm::Bfs => bfs::run(graph, start, &mut rec),
        Algorithm::Dfs => dfs::run(graph, start, &mut rec),
        Algorithm::Dijkstra => best_first::run(graph, start, Ranking::Distance, &mut rec),
        Algorithm::AStar => {
            // validate() guarantees a goal for A*
            let goal = graph.goal().ok_or(TraceError::MissingGoal(algorithm))?;
            best_first::run(graph, start, Ranking::Estimate { goal }, &mut rec)
        }
    }

    let (steps, costs, parents) = rec.finish();
    debug!(%algorithm, start = %start, steps = steps.len(), "generated trace");
    Ok(Trace::new(algorithm, start, steps, costs, parents))
}

fn validate(graph: &Graph, algorithm: Algorithm, start: NodeId) -> Result<()> {
    if graph.is_empty() {
        return Err(TraceError::EmptyGraph);
    }
    if !graph.contains(start) {
        return Err(TraceError::UnknownStart(start));
    }
    if let Some(goal) = graph.goal() {
        if !graph.contains(goal) {
            return Err(TraceError::UnknownGoal(goal));
        }
    }
    if algorithm.is_informed() {
        if graph.goal().is_none() {
            return Err(TraceError::MissingGoal(algorithm));
        }
        if !graph.has_heuristics() {
            return Err(TraceError::MissingHeuristic(algorithm));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pathlab_graph::{fixtures, Edge, Node};

    use super::*;

    fn labels(graph: &Graph, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| graph.label(id).to_string()).collect()
    }

    #[test]
    fn bfs_tree_visits_in_level_order() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Bfs).unwrap();
        assert_eq!(
            labels(&tree, &trace.visit_order()),
            ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]
        );
    }

    #[test]
    fn dfs_tree_visits_depth_first() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Dfs).unwrap();
        assert_eq!(
            labels(&tree, &trace.visit_order()),
            ["a", "b", "d", "h", "e", "i", "j", "c", "f", "k", "g"]
        );
    }

    #[test]
    fn dfs_backtracks_to_b_after_d_subtree() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Dfs).unwrap();
        let steps = trace.steps();

        let visit_h = steps
            .iter()
            .position(|s| s.program_point == ProgramPoint::Visit && s.current == Some(NodeId(7)))
            .unwrap();
        assert_eq!(steps[visit_h + 1].program_point, ProgramPoint::Backtrack);
        assert_eq!(steps[visit_h + 1].message, "Backtrack to d");
        assert_eq!(steps[visit_h + 2].program_point, ProgramPoint::Backtrack);
        assert_eq!(steps[visit_h + 2].message, "Backtrack to b");
        assert_eq!(steps[visit_h + 3].message, "Visiting e");
    }

    #[test]
    fn dijkstra_network_shortest_path() {
        let net = fixtures::network().unwrap();
        let goal = net.goal().unwrap();
        let trace = generate(&net, Algorithm::Dijkstra).unwrap();

        assert_eq!(trace.cost_to(goal), Some(7));
        let path = trace.path_to(goal).unwrap();
        assert_eq!(labels(&net, &path), ["Start", "B", "D", "Goal"]);
    }

    #[test]
    fn astar_stops_at_goal_before_c() {
        let net = fixtures::network().unwrap();
        let goal = net.goal().unwrap();
        let trace = generate(&net, Algorithm::AStar).unwrap();

        assert_eq!(trace.cost_to(goal), Some(7));
        let last = trace.steps().last().unwrap();
        assert_eq!(last.program_point, ProgramPoint::Visit);
        assert_eq!(last.current, Some(goal));
        assert!(!last.is_visited(NodeId(3)));
        assert_eq!(labels(&net, &trace.visit_order()), ["Start", "B", "D", "Goal"]);

        let dijkstra = generate(&net, Algorithm::Dijkstra).unwrap();
        assert!(trace.visit_order().len() <= dijkstra.visit_order().len());
    }

    #[test]
    fn every_trace_starts_with_initialize() {
        let tree = fixtures::tree().unwrap();
        let net = fixtures::network().unwrap();
        for algorithm in Algorithm::ALL {
            let graph = match algorithm.graph_kind() {
                GraphKind::Tree => &tree,
                GraphKind::Network => &net,
            };
            let trace = generate(graph, algorithm).unwrap();
            assert!(!trace.is_empty());
            assert_eq!(trace.steps()[0].current, None);
            assert_eq!(trace.steps()[0].program_point, ProgramPoint::Initialize);
            assert!(trace.steps()[1..].iter().all(|s| s.current.is_some()));
        }
    }

    #[test]
    fn generation_is_byte_for_byte_deterministic() {
        let net = fixtures::network().unwrap();
        for algorithm in Algorithm::ALL {
            let a = serde_json::to_vec(&generate(&net, algorithm).unwrap()).unwrap();
            let b = serde_json::to_vec(&generate(&net, algorithm).unwrap()).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn configuration_errors() {
        let empty = Graph::new(vec![], vec![]).unwrap();
        assert_eq!(generate(&empty, Algorithm::Bfs), Err(TraceError::EmptyGraph));

        let tree = fixtures::tree().unwrap();
        let far = TraceConfig::default().with_start(42);
        assert_eq!(
            generate_with(&tree, Algorithm::Dfs, &far),
            Err(TraceError::UnknownStart(NodeId(42)))
        );
        assert_eq!(
            generate(&tree, Algorithm::AStar),
            Err(TraceError::MissingGoal(Algorithm::AStar))
        );
        assert_eq!(
            generate(&tree.clone().with_goal(10), Algorithm::AStar),
            Err(TraceError::MissingHeuristic(Algorithm::AStar))
        );
        assert_eq!(
            generate(&tree.with_goal(11), Algorithm::Bfs),
            Err(TraceError::UnknownGoal(NodeId(11)))
        );
    }

    #[test]
    fn partial_heuristics_read_as_zero() {
        let nodes = vec![
            Node::new(0, "s").with_heuristic(1),
            Node::new(1, "m"),
            Node::new(2, "t"),
        ];
        let edges = vec![Edge::weighted(0, 1, 1), Edge::weighted(1, 2, 1)];
        let graph = Graph::new(nodes, edges).unwrap().with_goal(2);

        let trace = generate(&graph, Algorithm::AStar).unwrap();
        assert_eq!(trace.cost_to(NodeId(2)), Some(2));
    }

    #[test]
    fn custom_start_node() {
        let tree = fixtures::tree().unwrap();
        let config = TraceConfig::default().with_start(2);
        let trace = generate_with(&tree, Algorithm::Bfs, &config).unwrap();

        assert_eq!(trace.start(), NodeId(2));
        assert_eq!(
            labels(&tree, &trace.visit_order()),
            ["c", "a", "f", "g", "b", "k", "d", "e", "h", "i", "j"]
        );
    }
}
