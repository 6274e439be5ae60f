//! Algorithm selector and the descriptive catalog shown alongside a replay.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ProgramPoint;

/// The four searches the visualizer can replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

/// Which fixture graph an algorithm is demonstrated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Unweighted binary tree.
    Tree,
    /// Weighted network with a goal and heuristic.
    Network,
}

impl Algorithm {
    /// All algorithms, in selector order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "Breadth-First Search",
            Algorithm::Dfs => "Depth-First Search",
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::AStar => "A* Search",
        }
    }

    /// The data structure holding the frontier.
    pub fn frontier_kind(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "FIFO queue",
            Algorithm::Dfs => "LIFO stack",
            Algorithm::Dijkstra => "Priority queue keyed by distance",
            Algorithm::AStar => "Priority queue keyed by g + h",
        }
    }

    /// Whether the search is guided by a heuristic.
    pub fn is_informed(&self) -> bool {
        matches!(self, Algorithm::AStar)
    }

    /// Whether edge weights affect the search order.
    pub fn uses_weights(&self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    pub fn graph_kind(&self) -> GraphKind {
        if self.uses_weights() {
            GraphKind::Network
        } else {
            GraphKind::Tree
        }
    }

    pub fn pseudocode(&self) -> &'static [&'static str] {
        match self {
            Algorithm::Bfs => &[
                "Q = [start]; mark start",
                "while Q:",
                "  u = Q.pop_front()",
                "  for v in unmarked neighbors(u): mark v; Q.push_back(v)",
            ],
            Algorithm::Dfs => &[
                "S = [start]",
                "dfs(u): mark u",
                "  for v in unmarked neighbors(u): S.push(v); dfs(v); S.pop()",
                "  return to caller",
            ],
            Algorithm::Dijkstra => &[
                "dist[start] = 0; PQ = [(0, start)]",
                "while PQ:",
                "  u = PQ.pop_min(); skip if finalized",
                "  for (v, w) in edges(u): if dist[u] + w < dist[v]: PQ.push(v)",
            ],
            Algorithm::AStar => &[
                "g[start] = 0; PQ = [(h(start), start)]",
                "while PQ:",
                "  u = PQ.pop_min(); stop if u is goal",
                "  for (v, w) in edges(u): if g[u] + w < g[v]: PQ.push(v, g[v] + h(v))",
            ],
        }
    }

    /// Pseudocode line to highlight for a step at `point`.
    pub fn line_for(&self, point: ProgramPoint) -> Option<usize> {
        match (self, point) {
            (_, ProgramPoint::Initialize) => Some(0),
            (Algorithm::Dfs, ProgramPoint::Visit) => Some(1),
            (_, ProgramPoint::Visit) => Some(2),
            (Algorithm::Dfs, ProgramPoint::Discover) => Some(2),
            (_, ProgramPoint::Discover) => Some(3),
            (Algorithm::Dfs, ProgramPoint::Backtrack) => Some(3),
            (_, ProgramPoint::Backtrack) => None,
        }
    }

    pub fn concept(&self) -> &'static str {
        match self {
            Algorithm::Bfs => {
                "Explores layer by layer from the source. The first time a node is \
                 found, it has been reached by a path with the fewest possible edges."
            }
            Algorithm::Dfs => {
                "Follows one branch as deep as it goes before backing up to the most \
                 recent node with unexplored neighbors."
            }
            Algorithm::Dijkstra => {
                "Always finalizes the cheapest pending node next, so every finalized \
                 node already carries its shortest total path cost."
            }
            Algorithm::AStar => {
                "Ranks pending nodes by cost so far plus a heuristic guess of the cost \
                 remaining, skipping paths that head away from the goal."
            }
        }
    }

    pub fn complexity(&self) -> &'static str {
        match self {
            Algorithm::Bfs | Algorithm::Dfs => "Time: O(V + E) | Space: O(V)",
            Algorithm::Dijkstra => "Time: O((V + E) log V) | Space: O(V)",
            Algorithm::AStar => "Time: O(E) with a perfect heuristic | Space: O(V)",
        }
    }

    pub fn applications(&self) -> &'static [&'static str] {
        match self {
            Algorithm::Bfs => &[
                "GPS navigation",
                "Friend suggestions",
                "Network broadcasting",
            ],
            Algorithm::Dfs => &[
                "Puzzle solving",
                "Topological sorting",
                "Cycle detection",
            ],
            Algorithm::Dijkstra => &["Map routing", "OSPF routing", "Logistics"],
            Algorithm::AStar => &[
                "Game pathfinding",
                "Robotics",
                "Natural language processing",
            ],
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "DIJKSTRA",
            Algorithm::AStar => "ASTAR",
        };
        f.write_str(name)
    }
}

/// Returned when a string names no known algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?}, expected one of bfs, dfs, dijkstra, astar")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}
