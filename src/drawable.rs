//! The output data model: closed polygons, open polylines and floating
//! text, unified behind the [`Drawable`] variant.

use derive_more::{From, with_trait::IsVariant};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    math::{Cell, Point, Segment},
    primitives::Node,
    style::Style,
};

fn same_endpoints(s: Segment, a: Point, b: Point) -> bool {
    let (sa, sb) = (s.a.quantized(), s.b.quantized());
    let (qa, qb) = (a.quantized(), b.quantized());
    (sa, sb) == (qa, qb) || (sa, sb) == (qb, qa)
}

fn bounds(positions: impl Iterator<Item = Point>) -> (Point, Point) {
    positions.fold(
        (Point::new(f64::INFINITY, f64::INFINITY), Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY)),
        |(min, max), p| {
            (Point::new(min.x.min(p.x), min.y.min(p.y)), Point::new(max.x.max(p.x), max.y.max(p.y)))
        },
    )
}

/// A closed face of the composed graph. Nodes are stored once, in cyclic
/// order, without repeating the first node at the end.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Polygon {
    nodes: Vec<Node>,
    z_order: usize,
    names: Vec<String>,
    style: Style,
}

impl Polygon {
    pub fn new(nodes: Vec<Node>) -> Self {
        Polygon { nodes, z_order: 0, names: Vec::new(), style: Style::default() }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.nodes
            .iter()
            .copied()
            .circular_tuple_windows()
            .map(|(a, b)| Segment::new(a.position, b.position))
    }

    pub fn edges(&self) -> Vec<(Node, Node)> {
        self.nodes.iter().copied().circular_tuple_windows().collect()
    }

    pub fn has_edge(&self, a: Point, b: Point) -> bool {
        self.segments().any(|s| same_endpoints(s, a, b))
    }

    /// Even-odd ray cast. Points on the boundary are not reliably inside.
    pub fn contains_point(&self, p: Point) -> bool {
        let mut inside = false;
        for s in self.segments() {
            if (s.a.y > p.y) != (s.b.y > p.y) {
                let x_int = s.a.x + (p.y - s.a.y) / (s.b.y - s.a.y) * (s.b.x - s.a.x);
                if p.x < x_int {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Strict containment: every node of `other` lies inside and the two
    /// boundaries do not cross.
    pub fn contains(&self, other: &Polygon) -> bool {
        other.nodes.iter().all(|n| self.contains_point(n.position))
            && !self.segments().any(|s| other.segments().any(|t| s.crosses(&t)))
    }

    pub fn min(&self) -> Point {
        bounds(self.nodes.iter().map(|n| n.position)).0
    }

    pub fn max(&self) -> Point {
        bounds(self.nodes.iter().map(|n| n.position)).1
    }
}

/// A residual connected subgraph without cycle edges, decomposed into
/// maximal trails. A closed trail repeats its first node at the end.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct OpenGraph {
    nodes: Vec<Node>,
    edges: Vec<(Node, Node)>,
    paths: Vec<Vec<Node>>,
    z_order: usize,
    names: Vec<String>,
    style: Style,
}

impl OpenGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<(Node, Node)>, paths: Vec<Vec<Node>>) -> Self {
        OpenGraph { nodes, edges, paths, z_order: 0, names: Vec::new(), style: Style::default() }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(Node, Node)] {
        &self.edges
    }

    pub fn paths(&self) -> &[Vec<Node>] {
        &self.paths
    }

    pub fn has_edge(&self, a: Point, b: Point) -> bool {
        self.edges
            .iter()
            .any(|&(u, v)| same_endpoints(Segment::new(u.position, v.position), a, b))
    }

    pub fn min(&self) -> Point {
        bounds(self.nodes.iter().map(|n| n.position)).0
    }

    pub fn max(&self) -> Point {
        bounds(self.nodes.iter().map(|n| n.position)).1
    }
}

/// A text token placed on the grid by the upstream tokenizer.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Text {
    position: Cell,
    content: String,
    z_order: usize,
    names: Vec<String>,
    style: Style,
}

impl Text {
    pub fn new(position: Cell, content: impl Into<String>) -> Self {
        Text {
            position,
            content: content.into(),
            z_order: 0,
            names: Vec::new(),
            style: Style::default(),
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Center of the cell holding the first character.
    pub fn center(&self) -> Point {
        self.position.as_point() + Point::new(0.5, 0.5)
    }

    pub fn letter_position(&self, i: usize) -> Point {
        self.position.as_point() + Point::new(i as f64, 0.0)
    }

    /// Segment from the first to the last letter cell. Collapses to a
    /// point for single-letter (or empty) content.
    pub fn baseline(&self) -> Segment {
        let last = self.content.chars().count().saturating_sub(1);
        Segment::new(self.letter_position(0), self.letter_position(last))
    }
}

/// A drawable with a stacking position and bound names.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
#[derive(From, IsVariant)]
pub enum Drawable {
    Polygon(Polygon),
    OpenGraph(OpenGraph),
    Text(Text),
}

impl Drawable {
    pub fn edges(&self) -> Vec<(Node, Node)> {
        match self {
            Drawable::Polygon(p) => p.edges(),
            Drawable::OpenGraph(g) => g.edges().to_vec(),
            Drawable::Text(_) => Vec::new(),
        }
    }

    pub fn has_edge(&self, a: Point, b: Point) -> bool {
        match self {
            Drawable::Polygon(p) => p.has_edge(a, b),
            Drawable::OpenGraph(g) => g.has_edge(a, b),
            Drawable::Text(_) => false,
        }
    }

    pub fn z_order(&self) -> usize {
        match self {
            Drawable::Polygon(p) => p.z_order,
            Drawable::OpenGraph(g) => g.z_order,
            Drawable::Text(t) => t.z_order,
        }
    }

    pub fn set_z_order(&mut self, z_order: usize) {
        match self {
            Drawable::Polygon(p) => p.z_order = z_order,
            Drawable::OpenGraph(g) => g.z_order = z_order,
            Drawable::Text(t) => t.z_order = z_order,
        }
    }

    pub fn add_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self {
            Drawable::Polygon(p) => p.names.push(name),
            Drawable::OpenGraph(g) => g.names.push(name),
            Drawable::Text(t) => t.names.push(name),
        }
    }

    pub fn names(&self) -> &[String] {
        match self {
            Drawable::Polygon(p) => &p.names,
            Drawable::OpenGraph(g) => &g.names,
            Drawable::Text(t) => &t.names,
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            Drawable::Polygon(p) => &p.style,
            Drawable::OpenGraph(g) => &g.style,
            Drawable::Text(t) => &t.style,
        }
    }

    pub fn set_style(&mut self, style: Style) {
        match self {
            Drawable::Polygon(p) => p.style = style,
            Drawable::OpenGraph(g) => g.style = style,
            Drawable::Text(t) => t.style = style,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Drawable::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_open_graph(&self) -> Option<&OpenGraph> {
        match self {
            Drawable::OpenGraph(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Drawable::Text(t) => Some(t),
            _ => None,
        }
    }
}
