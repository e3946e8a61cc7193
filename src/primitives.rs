//! Geometric primitives emitted by stencils: nodes and edges in local
//! stencil coordinates, translated into grid space on every match.

use derive_more::with_trait::IsVariant;
use serde::{Deserialize, Serialize};

use crate::math::{Point, Segment};

/// Controls path construction at the node: sharp corner or rounded.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize)]
#[derive(IsVariant)]
pub enum NodeStyle {
    #[default]
    Miter,
    Curve,
}

/// A point with drawing attributes. `fusable` decides whether a node
/// coalesces with a coincident node during graph composition; anchors
/// (`fusable = false`) keep their own identity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Node {
    pub position: Point,
    pub style: NodeStyle,
    pub fusable: bool,
}

impl Node {
    pub const fn miter(x: f64, y: f64) -> Self {
        Node { position: Point::new(x, y), style: NodeStyle::Miter, fusable: true }
    }

    pub const fn curve(x: f64, y: f64) -> Self {
        Node { position: Point::new(x, y), style: NodeStyle::Curve, fusable: true }
    }

    /// Marks the node as non-fusable.
    pub const fn anchored(mut self) -> Self {
        self.fusable = false;
        self
    }

    pub fn translated(mut self, offset: Point) -> Self {
        self.position = self.position + offset;
        self
    }
}

/// An edge between two nodes. `top_of` references the segment drawn
/// above this edge, wherever that segment ends up: the referenced
/// segment's owner is stacked over this edge's owner.
#[derive(Copy, Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Edge {
    pub start: Node,
    pub end: Node,
    pub top_of: Option<Segment>,
}

impl Edge {
    pub const fn between(start: Node, end: Node) -> Self {
        Edge { start, end, top_of: None }
    }

    pub const fn beneath(mut self, above: Segment) -> Self {
        self.top_of = Some(above);
        self
    }

    pub fn length(&self) -> f64 {
        self.start.position.distance_to(self.end.position)
    }

    pub fn translated(mut self, offset: Point) -> Self {
        self.start = self.start.translated(offset);
        self.end = self.end.translated(offset);
        self.top_of = self.top_of.map(|seg| seg.translated(offset));
        self
    }
}
