//! Pathlab Graph Model
//!
//! Small, immutable, undirected graphs that the search visualizer replays
//! algorithms over.
//!
//! # Model
//!
//! - Node ids form a dense range `0..n`; node `i` sits at position `i`.
//! - Edges are unordered pairs. Each edge `(u, v)` contributes a `u→v` and a
//!   `v→u` entry to the adjacency view.
//! - An edge without a weight costs 1.
//! - Heuristic values (`h`) are optional per node and only read by A*.
//!
//! A [`Graph`] is validated once on construction and never mutated afterwards,
//! so a trace generated from it can be replayed against it for its whole
//! lifetime.
//!
//! # Fixtures
//!
//! [`fixtures::tree`] and [`fixtures::network`] are the two graphs the
//! visualizer ships with: an 11-node binary tree for the unweighted searches
//! and a 6-node weighted network for Dijkstra and A*.

mod error;
pub mod fixtures;
mod graph;
mod node;

pub use error::GraphError;
pub use graph::{Edge, Graph, Neighbor};
pub use node::{Node, NodeId, Point};

/// Path cost, edge weight and heuristic unit.
pub type Cost = u64;

/// Cost of traversing an edge that carries no explicit weight.
pub const UNIT_COST: Cost = 1;
