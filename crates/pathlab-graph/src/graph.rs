//! Validated graph with a symmetric adjacency view.

use std::collections::BTreeSet;

use crate::{Cost, GraphError, Node, NodeId, UNIT_COST};

/// An undirected edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
    #[cfg_attr(feature = "serde", serde(default, rename = "w", skip_serializing_if = "Option::is_none"))]
    pub weight: Option<Cost>,
}

impl Edge {
    /// An unweighted edge.
    pub const fn new(u: usize, v: usize) -> Self {
        Self {
            u: NodeId(u),
            v: NodeId(v),
            weight: None,
        }
    }

    /// A weighted edge.
    pub const fn weighted(u: usize, v: usize, weight: Cost) -> Self {
        Self {
            u: NodeId(u),
            v: NodeId(v),
            weight: Some(weight),
        }
    }

    /// Traversal cost: the weight, or [`UNIT_COST`] when absent.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.weight.unwrap_or(UNIT_COST)
    }

    fn key(&self) -> (NodeId, NodeId) {
        (self.u.min(self.v), self.u.max(self.v))
    }
}

/// One hop out of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: Cost,
}

/// Immutable undirected graph.
///
/// Construction validates the node/edge sets and builds the adjacency lists.
/// Each list is sorted by ascending neighbor id, so every traversal that walks
/// [`Graph::neighbors`] in order already follows the ascending-id tie-break.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GraphParts", into = "GraphParts")
)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    goal: Option<NodeId>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl Graph {
    /// Validate `nodes` and `edges` and build the adjacency view.
    ///
    /// An empty node set is accepted here; searching it is what fails.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        for (position, node) in nodes.iter().enumerate() {
            if node.id.index() != position {
                return Err(GraphError::NonDenseId {
                    position,
                    id: node.id,
                });
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        let mut seen = BTreeSet::new();

        for (index, edge) in edges.iter().enumerate() {
            for endpoint in [edge.u, edge.v] {
                if endpoint.index() >= nodes.len() {
                    return Err(GraphError::UnknownNode {
                        edge: index,
                        node: endpoint,
                    });
                }
            }
            if edge.u == edge.v {
                return Err(GraphError::SelfLoop {
                    edge: index,
                    node: edge.u,
                });
            }
            let (u, v) = edge.key();
            if !seen.insert((u, v)) {
                return Err(GraphError::DuplicateEdge { edge: index, u, v });
            }

            let weight = edge.cost();
            adjacency[edge.u.index()].push(Neighbor { node: edge.v, weight });
            adjacency[edge.v.index()].push(Neighbor { node: edge.u, weight });
        }

        for list in &mut adjacency {
            list.sort_by_key(|n| n.node);
        }

        Ok(Self {
            nodes,
            edges,
            goal: None,
            adjacency,
        })
    }

    /// Designate the goal node searched for by A*.
    ///
    /// The id is checked when a trace is generated, not here.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<NodeId>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Display label of a node, `"?"` for ids outside the graph.
    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).map_or("?", |n| n.label.as_str())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Neighbors of `id` in ascending id order. Empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> &[Neighbor] {
        self.adjacency.get(id.index()).map_or(&[], Vec::as_slice)
    }

    /// Whether at least one node carries a heuristic value.
    pub fn has_heuristics(&self) -> bool {
        self.nodes.iter().any(|n| n.heuristic.is_some())
    }

    /// Whether at least one edge carries an explicit weight.
    pub fn is_weighted(&self) -> bool {
        self.edges.iter().any(|e| e.weight.is_some())
    }

    /// Cost of the edge joining `a` and `b`, if there is one.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.neighbors(a)
            .iter()
            .find(|n| n.node == b)
            .map(|n| n.weight)
    }
}

/// Wire form of a [`Graph`]; deserializing re-runs validation.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GraphParts {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    goal: Option<NodeId>,
}

#[cfg(feature = "serde")]
impl TryFrom<GraphParts> for Graph {
    type Error = GraphError;

    fn try_from(parts: GraphParts) -> Result<Self, Self::Error> {
        let graph = Graph::new(parts.nodes, parts.edges)?;
        Ok(match parts.goal {
            Some(goal) => graph.with_goal(goal),
            None => graph,
        })
    }
}

#[cfg(feature = "serde")]
impl From<Graph> for GraphParts {
    fn from(graph: Graph) -> Self {
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
            goal: graph.goal,
        }
    }
}
