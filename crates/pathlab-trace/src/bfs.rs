//! Breadth-first search over a FIFO queue.

use std::collections::{BTreeSet, VecDeque};

use pathlab_graph::{Graph, NodeId};

use crate::recorder::Recorder;
use crate::ProgramPoint;

pub(crate) fn run(graph: &Graph, start: NodeId, rec: &mut Recorder<'_>) {
    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    rec.settle(start, 0, None);

    rec.record(
        ProgramPoint::Initialize,
        None,
        queue.iter().copied(),
        &visited,
        "Initialize search".into(),
        format!(
            "Start at '{}': mark it visited and place it in the queue.",
            rec.label(start)
        ),
    );

    while let Some(u) = queue.pop_front() {
        rec.record(
            ProgramPoint::Visit,
            Some(u),
            queue.iter().copied(),
            &visited,
            format!("Visiting {}", rec.label(u)),
            "Pop the node at the front of the queue.".into(),
        );

        let depth = rec.cost(u).unwrap_or(0);
        for hop in graph.neighbors(u) {
            if !visited.insert(hop.node) {
                continue;
            }
            queue.push_back(hop.node);
            rec.settle(hop.node, depth + 1, Some(u));
            rec.record(
                ProgramPoint::Discover,
                Some(u),
                queue.iter().copied(),
                &visited,
                format!("Found {}", rec.label(hop.node)),
                format!(
                    "'{}' is {} hop(s) from the start; add it to the back of the queue.",
                    rec.label(hop.node),
                    depth + 1
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use pathlab_graph::fixtures;

    use crate::{generate, Algorithm, ProgramPoint};

    #[test]
    fn first_step_seeds_queue_and_visited() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Bfs).unwrap();
        let first = &trace.steps()[0];

        assert_eq!(first.program_point, ProgramPoint::Initialize);
        assert_eq!(first.current, None);
        assert_eq!(first.frontier.len(), 1);
        assert_eq!(first.visited.len(), 1);
    }

    #[test]
    fn discover_snapshot_includes_new_entry() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Bfs).unwrap();

        // init, visit a, found b, found c
        let found_c = &trace.steps()[3];
        assert_eq!(found_c.program_point, ProgramPoint::Discover);
        assert_eq!(found_c.message, "Found c");
        let labels: Vec<_> = found_c.frontier.iter().map(|&n| tree.label(n)).collect();
        assert_eq!(labels, vec!["b", "c"]);
    }

    #[test]
    fn one_visit_and_one_discover_per_non_root() {
        let tree = fixtures::tree().unwrap();
        let trace = generate(&tree, Algorithm::Bfs).unwrap();

        let visits = trace.steps().iter().filter(|s| s.program_point == ProgramPoint::Visit).count();
        let finds = trace.steps().iter().filter(|s| s.program_point == ProgramPoint::Discover).count();
        assert_eq!(visits, 11);
        assert_eq!(finds, 10);
        assert_eq!(trace.len(), 1 + 11 + 10);
    }
}
