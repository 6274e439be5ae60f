//! The two graphs the visualizer ships with.
//!
//! Positions are in a 500×320 viewport.

use crate::{Edge, Graph, GraphError, Node};

/// 11-node binary tree rooted at `a` (id 0), labels `a` through `k`.
///
/// ```text
///             a
///        b         c
///     d     e    f    g
///     h    i j   k
/// ```
pub fn tree() -> Result<Graph, GraphError> {
    let nodes = vec![
        Node::new(0, "a").at(250.0, 50.0),
        Node::new(1, "b").at(140.0, 120.0),
        Node::new(2, "c").at(360.0, 120.0),
        Node::new(3, "d").at(80.0, 200.0),
        Node::new(4, "e").at(200.0, 200.0),
        Node::new(5, "f").at(300.0, 200.0),
        Node::new(6, "g").at(420.0, 200.0),
        Node::new(7, "h").at(80.0, 280.0),
        Node::new(8, "i").at(170.0, 280.0),
        Node::new(9, "j").at(230.0, 280.0),
        Node::new(10, "k").at(300.0, 280.0),
    ];
    let edges = vec![
        Edge::new(0, 1),
        Edge::new(0, 2),
        Edge::new(1, 3),
        Edge::new(1, 4),
        Edge::new(2, 5),
        Edge::new(2, 6),
        Edge::new(3, 7),
        Edge::new(4, 8),
        Edge::new(4, 9),
        Edge::new(5, 10),
    ];
    Graph::new(nodes, edges)
}

/// Six-node weighted network from `Start` (id 0) to `Goal` (id 5).
///
/// Shortest path is Start→B→D→Goal with cost 7. The heuristic never exceeds
/// the true remaining cost and satisfies `h(u) <= w(u, v) + h(v)` on every
/// edge.
pub fn network() -> Result<Graph, GraphError> {
    let nodes = vec![
        Node::new(0, "Start").with_heuristic(6).at(60.0, 160.0),
        Node::new(1, "A").with_heuristic(8).at(180.0, 70.0),
        Node::new(2, "B").with_heuristic(4).at(180.0, 250.0),
        Node::new(3, "C").with_heuristic(5).at(320.0, 70.0),
        Node::new(4, "D").with_heuristic(2).at(320.0, 250.0),
        Node::new(5, "Goal").with_heuristic(0).at(440.0, 160.0),
    ];
    let edges = vec![
        Edge::weighted(0, 1, 4),
        Edge::weighted(0, 2, 2),
        Edge::weighted(1, 2, 5),
        Edge::weighted(1, 3, 10),
        Edge::weighted(2, 4, 3),
        Edge::weighted(3, 4, 4),
        Edge::weighted(3, 5, 11),
        Edge::weighted(4, 5, 2),
        Edge::weighted(2, 3, 8),
    ];
    Ok(Graph::new(nodes, edges)?.with_goal(5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeId;

    #[test]
    fn tree_shape() {
        let tree = tree().unwrap();
        assert_eq!(tree.node_count(), 11);
        assert_eq!(tree.edge_count(), 10);
        assert_eq!(tree.label(NodeId(10)), "k");
        assert!(!tree.is_weighted());
        assert!(tree.goal().is_none());
    }

    #[test]
    fn network_shape() {
        let net = network().unwrap();
        assert_eq!(net.node_count(), 6);
        assert_eq!(net.edge_count(), 9);
        assert_eq!(net.goal(), Some(NodeId(5)));
        assert_eq!(net.label(NodeId(5)), "Goal");
        assert_eq!(net.edge_weight(NodeId(4), NodeId(5)), Some(2));
    }

    #[test]
    fn network_heuristic_is_consistent() {
        let net = network().unwrap();
        for edge in net.edges() {
            let hu = net.node(edge.u).unwrap().h();
            let hv = net.node(edge.v).unwrap().h();
            assert!(hu <= edge.cost() + hv, "h inconsistent on {:?}", edge);
            assert!(hv <= edge.cost() + hu, "h inconsistent on {:?}", edge);
        }
        assert_eq!(net.node(NodeId(5)).unwrap().h(), 0);
    }
}
