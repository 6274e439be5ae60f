//! Dijkstra and A*: best-first search over a re-sorted priority collection.
//!
//! There is no decrease-key. An improved cost pushes a second entry for the
//! same node; whichever entry pops first finalizes it and the rest are dropped
//! at pop time without producing a step.

use std::collections::BTreeSet;

use pathlab_graph::{Cost, Graph, NodeId};
use tracing::trace;

use crate::recorder::Recorder;
use crate::ProgramPoint;

/// How pending entries are ranked.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Ranking {
    /// By path cost so far (Dijkstra).
    Distance,
    /// By path cost plus heuristic, stopping once `goal` is finalized (A*).
    Estimate { goal: NodeId },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    node: NodeId,
    priority: Cost,
}

pub(crate) fn run(graph: &Graph, start: NodeId, ranking: Ranking, rec: &mut Recorder<'_>) {
    let h = |node: NodeId| graph.node(node).map_or(0, |n| n.h());
    let key = |node: NodeId, g: Cost| match ranking {
        Ranking::Distance => g,
        Ranking::Estimate { .. } => g.saturating_add(h(node)),
    };

    let mut finalized = BTreeSet::new();
    let mut pending = vec![Entry {
        node: start,
        priority: key(start, 0),
    }];
    rec.settle(start, 0, None);

    let explanation = match ranking {
        Ranking::Distance => "Find the cheapest total cost to every node.".to_string(),
        Ranking::Estimate { goal } => format!(
            "Rank pending nodes by cost so far plus a guess of the cost to '{}'.",
            rec.label(goal)
        ),
    };
    rec.record(
        ProgramPoint::Initialize,
        None,
        pending.iter().map(|e| e.node),
        &finalized,
        format!("Start at {}", rec.label(start)),
        explanation,
    );

    while !pending.is_empty() {
        // `sort_by_key` is stable: equal priorities keep insertion order.
        pending.sort_by_key(|e| e.priority);
        let Entry { node: u, priority } = pending.remove(0);
        if !finalized.insert(u) {
            trace!(node = %u, priority, "dropping stale entry");
            continue;
        }

        let g = rec.cost(u).unwrap_or(0);
        let (message, explanation) = match ranking {
            Ranking::Distance => (
                format!("Visit {} ({})", rec.label(u), g),
                "Pick the pending node with the lowest distance; its cost is now final.".to_string(),
            ),
            Ranking::Estimate { .. } => (
                format!("Visit {}", rec.label(u)),
                format!(
                    "Pick the pending node with the lowest f-cost: g({}) + h({}) = {}.",
                    g,
                    h(u),
                    priority
                ),
            ),
        };
        rec.record(
            ProgramPoint::Visit,
            Some(u),
            pending.iter().map(|e| e.node),
            &finalized,
            message,
            explanation,
        );

        if let Ranking::Estimate { goal } = ranking {
            if u == goal {
                trace!(goal = %u, cost = g, "goal finalized");
                break;
            }
        }

        for hop in graph.neighbors(u) {
            // Saturates at `Cost::MAX`.
            let candidate = g.saturating_add(hop.weight);
            if rec.cost(hop.node).is_some_and(|best| candidate >= best) {
                continue;
            }
            rec.settle(hop.node, candidate, Some(u));
            let priority = key(hop.node, candidate);
            pending.push(Entry {
                node: hop.node,
                priority,
            });

            let (message, explanation) = match ranking {
                Ranking::Distance => (
                    format!("Relaxing {}", rec.label(hop.node)),
                    format!(
                        "Going through '{}' lowers the cost of '{}' to {}.",
                        rec.label(u),
                        rec.label(hop.node),
                        candidate
                    ),
                ),
                Ranking::Estimate { .. } => (
                    format!("Update {}", rec.label(hop.node)),
                    format!("g({}) + h({}) = {}", candidate, h(hop.node), priority),
                ),
            };
            rec.record(
                ProgramPoint::Discover,
                Some(u),
                pending.iter().map(|e| e.node),
                &finalized,
                message,
                explanation,
            );
        }
    }
}
