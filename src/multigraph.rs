//! The composed geometric multigraph. Node identity is the quantized
//! coordinate plus the fusable flag: coincident fusable nodes coalesce,
//! coincident anchors coalesce with each other, and a fusable node and
//! an anchor at the same coordinate stay two identities.

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};

use crate::{
    math::{Point, Segment},
    primitives::{Edge, Node},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeMeta {
    pub top_of: Option<Segment>,
}

#[derive(Default)]
pub struct Multigraph {
    graph: UnGraph<Node, EdgeMeta>,
    by_position: HashMap<(i64, i64, bool), NodeIndex>,
}

impl Multigraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(&self) -> &UnGraph<Node, EdgeMeta> {
        &self.graph
    }

    pub fn node(&self, ix: NodeIndex) -> Node {
        self.graph[ix]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Inserts a node under the fusion rule. Attributes of an already
    /// present identity win over the new emission.
    pub fn insert_node(&mut self, node: Node) -> NodeIndex {
        let (kx, ky) = node.position.quantized();
        *self
            .by_position
            .entry((kx, ky, node.fusable))
            .or_insert_with(|| self.graph.add_node(node))
    }

    /// Inserts an edge, fusing both endpoints. A duplicate endpoint pair
    /// is dropped, except that a `top_of` annotation the present edge
    /// lacks is carried over (first annotation wins).
    pub fn insert_edge(&mut self, edge: Edge) {
        let start = self.insert_node(edge.start);
        let end = self.insert_node(edge.end);
        if start == end {
            return;
        }
        match self.graph.find_edge(start, end) {
            Some(present) => {
                let meta = &mut self.graph[present];
                if meta.top_of.is_none() {
                    meta.top_of = edge.top_of;
                }
            }
            None => {
                self.graph.add_edge(start, end, EdgeMeta { top_of: edge.top_of });
            }
        }
    }

    /// Node identities at a coordinate (a fusable one, an anchor, or both).
    pub fn nodes_at(&self, position: Point) -> impl Iterator<Item = NodeIndex> + '_ {
        let (kx, ky) = position.quantized();
        [(kx, ky, true), (kx, ky, false)]
            .into_iter()
            .filter_map(move |key| self.by_position.get(&key).copied())
    }

    /// Resolves an edge reference given by endpoint coordinates, if any
    /// pair of co-located identities is connected.
    pub fn find_edge_between(&self, a: Point, b: Point) -> Option<EdgeIndex> {
        self.nodes_at(a)
            .flat_map(|na| self.nodes_at(b).map(move |nb| (na, nb)))
            .find_map(|(na, nb)| self.graph.find_edge(na, nb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_fusable_nodes_coalesce() {
        let mut mg = Multigraph::new();
        let a = mg.insert_node(Node::miter(1.0, 0.5));
        let b = mg.insert_node(Node::miter(1.0, 0.5));
        assert_eq!(a, b);
        assert_eq!(mg.node_count(), 1);
    }

    #[test]
    fn anchors_share_an_identity() {
        let mut mg = Multigraph::new();
        let a = mg.insert_node(Node::miter(0.5, 0.5).anchored());
        let b = mg.insert_node(Node::miter(0.5, 0.5).anchored());
        assert_eq!(a, b);
    }

    #[test]
    fn anchor_and_fusable_node_stay_distinct() {
        let mut mg = Multigraph::new();
        let a = mg.insert_node(Node::miter(1.0, 0.5));
        let b = mg.insert_node(Node::miter(1.0, 0.5).anchored());
        assert_ne!(a, b);
        assert_eq!(mg.node_count(), 2);
        assert_eq!(mg.nodes_at(Point::new(1.0, 0.5)).count(), 2);
    }

    #[test]
    fn first_node_attributes_win() {
        let mut mg = Multigraph::new();
        let a = mg.insert_node(Node::curve(0.5, 0.5));
        mg.insert_node(Node::miter(0.5, 0.5));
        assert_eq!(mg.node(a).style, crate::primitives::NodeStyle::Curve);
    }

    #[test]
    fn duplicate_edges_merge_annotations() {
        let mut mg = Multigraph::new();
        let plain = Edge::between(Node::miter(1.0, 0.5), Node::miter(2.0, 0.5));
        let above = Segment::new(Point::new(1.5, 0.0), Point::new(1.5, 1.0));

        mg.insert_edge(plain);
        mg.insert_edge(plain.beneath(above));
        assert_eq!(mg.edge_count(), 1);

        let e = mg.find_edge_between(Point::new(2.0, 0.5), Point::new(1.0, 0.5)).unwrap();
        assert_eq!(mg.graph()[e].top_of, Some(above));

        // A second annotation does not replace the first
        let other = Segment::new(Point::new(1.5, -1.0), Point::new(1.5, 2.0));
        mg.insert_edge(plain.beneath(other));
        assert_eq!(mg.graph()[e].top_of, Some(above));
    }
}
