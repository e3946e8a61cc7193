//! Slides every catalog stencil over the grid and composes the matches
//! into one multigraph.

use log::{debug, trace};

use crate::{
    math::Grid,
    multigraph::Multigraph,
    overlay::{Primitive, catalog},
};

/// Matches all stencils against `grid` and returns the composed graph.
///
/// Scanning is a pure function of the grid: repeated scans produce the
/// same multigraph, and translating the grid translates every node.
pub fn scan(grid: &Grid<Option<char>>) -> Multigraph {
    let mut composed = Multigraph::new();

    for overlay in catalog() {
        let mut matched = 0usize;
        for origin in grid.dims().iter_within() {
            if !overlay.matches_at(grid, origin) {
                continue;
            }
            matched += 1;
            let offset = origin.as_point();
            for primitive in overlay.emits() {
                match primitive.translated(offset) {
                    Primitive::Node(node) => {
                        composed.insert_node(node);
                    }
                    Primitive::Edge(edge) => composed.insert_edge(edge),
                }
            }
        }
        if matched > 0 {
            trace!(target: "matcher", "{matched} matches for {:?}", overlay.dims());
        }
    }

    debug!(
        target: "matcher",
        "composed {} nodes and {} edges from a {} grid",
        composed.node_count(),
        composed.edge_count(),
        grid.dims()
    );
    composed
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::math::Point;

    fn node_keys(mg: &Multigraph) -> BTreeSet<(i64, i64, bool)> {
        mg.graph()
            .node_indices()
            .map(|ix| {
                let node = mg.node(ix);
                let (kx, ky) = node.position.quantized();
                (kx, ky, node.fusable)
            })
            .collect()
    }

    #[test]
    fn single_dash_is_one_unit_edge() {
        let mg = scan(&Grid::from_text("-"));
        assert_eq!(mg.node_count(), 2);
        assert_eq!(mg.edge_count(), 1);
        assert!(mg.find_edge_between(Point::new(0.0, 0.5), Point::new(1.0, 0.5)).is_some());
    }

    #[test]
    fn dash_run_fuses_endpoints() {
        let mg = scan(&Grid::from_text("---"));
        assert_eq!(mg.node_count(), 4);
        assert_eq!(mg.edge_count(), 3);
    }

    #[test]
    fn lone_plus_is_a_single_anchor() {
        let mg = scan(&Grid::from_text("+"));
        assert_eq!(mg.node_count(), 1);
        assert_eq!(mg.edge_count(), 0);
        let anchor = mg.node(mg.graph().node_indices().next().unwrap());
        assert!(!anchor.fusable);
        assert_eq!(anchor.position, Point::new(0.5, 0.5));
    }

    #[test]
    fn box_corners_are_anchors() {
        let mg = scan(&Grid::from_rows(&["+-+", "| |", "+-+"]));
        // 4 corner anchors + 8 stroke endpoints, one ring of 12 edges
        assert_eq!(mg.node_count(), 12);
        assert_eq!(mg.edge_count(), 12);
        let anchors = mg
            .graph()
            .node_indices()
            .filter(|&ix| !mg.node(ix).fusable)
            .count();
        assert_eq!(anchors, 4);
    }

    #[test]
    fn scanning_twice_is_identical() {
        let grid = Grid::from_rows(&["+-+ --", "| |  ~", "+-+  |"]);
        let first = scan(&grid);
        let second = scan(&grid);
        assert_eq!(node_keys(&first), node_keys(&second));
        assert_eq!(first.edge_count(), second.edge_count());
    }

    #[test]
    fn translating_the_grid_translates_every_node() {
        let rows = ["+-+", "| |", "+-+"];
        let shifted = ["    ", "  +-+", "  | |", "  +-+"];

        let base = scan(&Grid::from_rows(&rows));
        let moved = scan(&Grid::from_rows(&shifted));

        let expect: BTreeSet<_> = node_keys(&base)
            .into_iter()
            .map(|(kx, ky, fusable)| (kx + 2000, ky + 1000, fusable))
            .collect();
        assert_eq!(node_keys(&moved), expect);
        assert_eq!(base.edge_count(), moved.edge_count());
    }
}
