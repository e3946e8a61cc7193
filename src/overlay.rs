//! The stencil catalog. Each overlay is a small character pattern with
//! wildcards, paired with the nodes and edges it emits in local
//! coordinates (cells are unit-sized, the pattern origin is the
//! upper-left cell). The catalog is compiled once per process.

use std::sync::LazyLock;

use crate::{
    math::{Cell, Dimensions, Grid, Point, Segment},
    primitives::{Edge, Node},
};

/// Span of the notch cut by a bracket crossing, along the crossed line.
pub const CROSSING_LENGTH: f64 = 0.5;
/// How far the notch bulges out of the crossed line.
pub const CROSSING_HEIGHT: f64 = 0.25;

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Node(Node),
    Edge(Edge),
}

impl Primitive {
    pub fn translated(&self, offset: Point) -> Primitive {
        match *self {
            Primitive::Node(n) => Primitive::Node(n.translated(offset)),
            Primitive::Edge(e) => Primitive::Edge(e.translated(offset)),
        }
    }
}

/// A single stencil: the pattern rows (space = wildcard) plus the
/// primitives emitted on a match.
#[derive(Clone, Debug)]
pub struct Overlay {
    pattern: Vec<Vec<Option<char>>>,
    emits: Vec<Primitive>,
}

impl Overlay {
    fn new<S: AsRef<str>>(rows: &[S], emits: Vec<Primitive>) -> Self {
        let pattern: Vec<Vec<Option<char>>> = rows
            .iter()
            .map(|row| {
                row.as_ref().chars().map(|c| if c == ' ' { None } else { Some(c) }).collect()
            })
            .collect();
        debug_assert!(pattern.iter().all(|row: &Vec<_>| row.len() == pattern[0].len()));
        Overlay { pattern, emits }
    }

    pub fn dims(&self) -> Dimensions {
        Dimensions::new(self.pattern.first().map_or(0, Vec::len), self.pattern.len())
    }

    pub fn emits(&self) -> &[Primitive] {
        &self.emits
    }

    /// True iff every non-wildcard pattern cell is in bounds and equal to
    /// the grid character at `origin + offset`.
    pub fn matches_at(&self, grid: &Grid<Option<char>>, origin: Cell) -> bool {
        self.pattern.iter().enumerate().all(|(i, row)| {
            row.iter().enumerate().all(|(j, &pat)| {
                let Some(want) = pat else { return true };
                let cell = origin + Cell::new(j as isize, i as isize);
                grid.get(cell).is_some_and(|&got| got == Some(want))
            })
        })
    }
}

fn e(start: Node, end: Node) -> Primitive {
    Primitive::Edge(Edge::between(start, end))
}

fn under(start: Node, end: Node, above: Segment) -> Primitive {
    Primitive::Edge(Edge::between(start, end).beneath(above))
}

fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
    Segment::new(Point::new(ax, ay), Point::new(bx, by))
}

static CATALOG: LazyLock<Vec<Overlay>> = LazyLock::new(build_catalog);

/// The compiled stencil catalog. Order is irrelevant to the output: all
/// emissions compose into one multigraph under the fusion rules.
pub fn catalog() -> &'static [Overlay] {
    &CATALOG
}

fn build_catalog() -> Vec<Overlay> {
    let n = Node::miter;
    let c = Node::curve;
    let a = |x, y| Node::miter(x, y).anchored();
    let ca = |x, y| Node::curve(x, y).anchored();

    let mut overlays = vec![
        // Axis-aligned strokes
        Overlay::new(&["-"], vec![e(n(0.0, 0.5), n(1.0, 0.5))]),
        Overlay::new(&["|"], vec![e(n(0.5, 0.0), n(0.5, 1.0))]),
        Overlay::new(&["/"], vec![e(n(0.0, 1.0), n(1.0, 0.0))]),
        Overlay::new(&["\\"], vec![e(n(1.0, 1.0), n(0.0, 0.0))]),
        // Plain crossings: the crossed stroke is drawn above the bridging edge
        Overlay::new(&["-|-"], vec![under(n(1.0, 0.5), n(2.0, 0.5), seg(1.5, 0.0, 1.5, 1.0))]),
        Overlay::new(&["|", "-", "|"], vec![under(n(0.5, 1.0), n(0.5, 2.0), seg(0.0, 1.5, 1.0, 1.5))]),
        // Junction arms: the + center is a shared anchor
        Overlay::new(&["+-"], vec![e(a(0.5, 0.5), n(1.0, 0.5))]),
        Overlay::new(&["-+"], vec![e(n(1.0, 0.5), a(1.5, 0.5))]),
        Overlay::new(&["+", "|"], vec![e(a(0.5, 0.5), n(0.5, 1.0))]),
        Overlay::new(&["|", "+"], vec![e(n(0.5, 1.0), a(0.5, 1.5))]),
        Overlay::new(&[" /", "+ "], vec![e(n(1.0, 1.0), a(0.5, 1.5))]),
        Overlay::new(&[" *", "+ "], vec![e(c(1.5, 0.5), a(0.5, 1.5))]),
        Overlay::new(&["* ", " +"], vec![e(c(0.5, 0.5), a(1.5, 1.5))]),
        Overlay::new(&["+ ", " +"], vec![e(a(0.5, 0.5), a(1.5, 1.5))]),
        Overlay::new(&[" +", "* "], vec![e(n(1.5, 0.5), ca(0.5, 1.5))]),
        Overlay::new(&[" +", "+ "], vec![e(a(1.5, 0.5), a(0.5, 1.5))]),
        Overlay::new(&["+ ", " *"], vec![e(n(0.5, 0.5), ca(1.5, 1.5))]),
        Overlay::new(&["\\ ", " +"], vec![e(n(1.0, 1.0), a(1.5, 1.5))]),
        Overlay::new(&["+ ", " \\"], vec![e(a(0.5, 0.5), n(1.0, 1.0))]),
        Overlay::new(&[" +", "/ "], vec![e(a(1.5, 0.5), n(1.0, 1.0))]),
        // A bare + is still an anchor, even with no arm to connect
        Overlay::new(&["+"], vec![Primitive::Node(Node::miter(0.5, 0.5).anchored())]),
        // Curve corners
        Overlay::new(&["|", "*"], vec![e(n(0.5, 1.0), c(0.5, 1.5))]),
        Overlay::new(&["*", "|"], vec![e(c(0.5, 0.5), n(0.5, 1.0))]),
        Overlay::new(&["*-"], vec![e(c(0.5, 0.5), n(1.0, 0.5))]),
        Overlay::new(&["-*"], vec![e(n(1.0, 0.5), c(1.5, 0.5))]),
        Overlay::new(&["++"], vec![e(a(0.5, 0.5), a(1.5, 0.5))]),
        Overlay::new(&["+", "+"], vec![e(a(0.5, 0.5), a(0.5, 1.5))]),
        // Arrowheads extend the adjacent stroke into the arrow cell
        Overlay::new(&["|", "v"], vec![e(n(0.5, 1.0), n(0.5, 1.55))]),
        Overlay::new(&["^", "|"], vec![e(n(0.5, 0.45), n(0.5, 1.0))]),
        Overlay::new(&["|", "^"], vec![e(n(0.5, 1.0), n(0.5, 1.45))]),
        Overlay::new(&["v", "|"], vec![e(n(0.5, 0.55), n(0.5, 1.0))]),
        Overlay::new(&["-<"], vec![e(n(1.0, 0.5), n(2.0, 0.5))]),
        Overlay::new(&[">-"], vec![e(n(0.0, 0.5), n(1.0, 0.5))]),
        Overlay::new(&["+", "^"], vec![e(n(0.5, 0.5), n(0.5, 1.45))]),
        Overlay::new(&["v", "+"], vec![e(n(0.5, 0.55), n(0.5, 1.5))]),
        Overlay::new(&["+<"], vec![e(n(0.5, 0.5), n(2.0, 0.5))]),
        Overlay::new(&[">+"], vec![e(n(0.0, 0.5), n(1.5, 0.5))]),
        // Curve runs
        Overlay::new(&["**"], vec![e(c(0.5, 0.5), c(1.5, 0.5))]),
        Overlay::new(&["*", "*"], vec![e(c(0.5, 0.5), c(0.5, 1.5))]),
        Overlay::new(&[" *", "* "], vec![e(c(1.5, 0.5), c(0.5, 1.5))]),
        Overlay::new(&["* ", " *"], vec![e(c(0.5, 0.5), c(1.5, 1.5))]),
    ];

    // Bracket crossings on a vertical line: a 5-segment sub-path with a
    // notch to the side of the line.
    let top = (1.0 - CROSSING_LENGTH) / 2.0;
    let bottom = 1.0 - (1.0 - CROSSING_LENGTH) / 2.0;
    let top_curve = top + CROSSING_LENGTH / 5.0;
    let bottom_curve = bottom - CROSSING_LENGTH / 5.0;
    let left = 0.5 - CROSSING_HEIGHT;
    let right = 0.5 + CROSSING_HEIGHT;

    overlays.push(Overlay::new(&["["], vec![
        e(n(0.5, 0.0), n(0.5, top)),
        e(n(0.5, top), n(left, top)),
        e(n(left, top), n(left, bottom)),
        e(n(0.5, bottom), n(left, bottom)),
        e(n(0.5, 1.0), n(0.5, bottom)),
    ]));
    overlays.push(Overlay::new(&["]"], vec![
        e(n(0.5, 0.0), n(0.5, top)),
        e(n(0.5, top), n(right, top)),
        e(n(right, top), n(right, bottom)),
        e(n(0.5, bottom), n(right, bottom)),
        e(n(0.5, 1.0), n(0.5, bottom)),
    ]));
    overlays.push(Overlay::new(&[")"], vec![
        e(c(0.5, 0.0), c(0.5, top)),
        e(c(0.5, top), c(right, top_curve)),
        e(c(right, top_curve), c(right, bottom_curve)),
        e(c(0.5, bottom), c(right, bottom_curve)),
        e(c(0.5, 1.0), c(0.5, bottom)),
    ]));
    overlays.push(Overlay::new(&["("], vec![
        e(c(0.5, 0.0), c(0.5, top)),
        e(c(0.5, top), c(left, top_curve)),
        e(c(left, top_curve), c(left, bottom_curve)),
        e(c(0.5, bottom), c(left, bottom_curve)),
        e(c(0.5, 1.0), c(0.5, bottom)),
    ]));

    // The horizontal variant bulges upward.
    let left = (1.0 - CROSSING_LENGTH) / 4.0;
    let right = 1.0 - (1.0 - CROSSING_LENGTH) / 4.0;
    let left_curve = left + CROSSING_LENGTH / 5.0;
    let right_curve = right - CROSSING_LENGTH / 5.0;
    let top = 0.5 - CROSSING_HEIGHT / 2.0;

    overlays.push(Overlay::new(&["~"], vec![
        e(c(0.0, 0.5), c(left, 0.5)),
        e(c(left, 0.5), c(left_curve, top)),
        e(c(left_curve, top), c(right_curve, top)),
        e(c(right_curve, top), c(right, 0.5)),
        e(c(right, 0.5), c(1.0, 0.5)),
    ]));

    // Flanking strokes connect to a bracket through a non-fusable stub,
    // so the bracket sub-path never merges into the crossed line.
    for bracket in ['[', ']', '(', ')'] {
        overlays.push(Overlay::new(&[format!("-{bracket}")], vec![e(a(1.0, 0.5), a(1.5, 0.5))]));
        overlays.push(Overlay::new(&[format!("{bracket}-")], vec![e(a(0.5, 0.5), a(1.0, 0.5))]));
    }
    overlays.push(Overlay::new(&["~", "|"], vec![e(a(0.5, 1.0), a(0.5, 0.5))]));
    overlays.push(Overlay::new(&["|", "~"], vec![e(a(0.5, 1.0), a(0.5, 1.5))]));

    overlays
}

#[cfg(test)]
mod tests {
    use assertables::assert_all;

    use super::*;
    use crate::primitives::NodeStyle;

    #[test]
    fn horizontal_stroke_mapping() {
        let grid = Grid::from_text("-");
        let dash = catalog()
            .iter()
            .find(|o| o.dims() == Dimensions::new(1, 1) && o.matches_at(&grid, Cell::new(0, 0)))
            .unwrap();
        assert_eq!(
            dash.emits(),
            &[e(Node::miter(0.0, 0.5), Node::miter(1.0, 0.5))]
        );
    }

    #[test]
    fn pattern_chars_require_bounds() {
        let grid = Grid::from_rows(&[" /", "+ "]);
        let diagonal = catalog()
            .iter()
            .find(|o| o.dims() == Dimensions::new(2, 2) && o.matches_at(&grid, Cell::new(0, 0)))
            .unwrap();
        assert_eq!(diagonal.emits().len(), 1);
        assert!(!diagonal.matches_at(&grid, Cell::new(1, 0)));
    }

    #[test]
    fn bracket_crossings_use_five_segments() {
        for text in ["[", "]", "(", ")", "~"] {
            let grid = Grid::from_text(text);
            let overlay = catalog()
                .iter()
                .find(|o| o.dims() == Dimensions::new(1, 1) && o.matches_at(&grid, Cell::new(0, 0)))
                .unwrap();
            assert_eq!(overlay.emits().len(), 5, "for {text}");
        }

        // Round brackets emit curve nodes, square ones stay mitered
        let grid = Grid::from_text("(");
        let round = catalog()
            .iter()
            .find(|o| o.dims() == Dimensions::new(1, 1) && o.matches_at(&grid, Cell::new(0, 0)))
            .unwrap();
        assert_all!(round.emits().iter(), |p: &Primitive| match p {
            Primitive::Edge(edge) =>
                edge.start.style == NodeStyle::Curve && edge.end.style == NodeStyle::Curve,
            Primitive::Node(node) => node.style == NodeStyle::Curve,
        });
    }

    #[test]
    fn crossing_annotates_the_bridging_edge() {
        let grid = Grid::from_text("-|-");
        let crossing = catalog()
            .iter()
            .find(|o| o.dims() == Dimensions::new(3, 1) && o.matches_at(&grid, Cell::new(0, 0)))
            .unwrap();
        let [Primitive::Edge(edge)] = crossing.emits() else {
            panic!("expected a single edge");
        };
        assert_eq!(edge.top_of, Some(seg(1.5, 0.0, 1.5, 1.0)));
    }
}
