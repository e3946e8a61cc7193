//! Parses 2D ASCII line art into vector drawables: closed polygons,
//! open polylines and floating text with a consistent back-to-front
//! stacking order. Rendering, file I/O and text tokenization live in
//! collaborating crates; this one is a pure function from a character
//! grid (plus text tokens) to a drawable list.

pub mod analyzer;
pub mod binder;
pub mod drawable;
pub mod matcher;
pub mod math;
pub mod multigraph;
pub mod overlay;
pub mod primitives;
pub mod style;

pub use crate::{
    drawable::{Drawable, OpenGraph, Polygon, Text},
    math::{Cell, Dimensions, Grid, GridError, Point, Segment},
    primitives::{Edge, Node, NodeStyle},
    style::{FillType, Rgba, Style},
};

/// The character grid consumed by the matcher. `None` cells (padding)
/// never match a stencil.
pub type TextGrid = Grid<Option<char>>;

/// Runs the whole pipeline: stencil matching, graph analysis and name
/// binding. The result is sorted back to front.
pub fn vectorize(grid: &TextGrid, texts: Vec<Text>) -> Vec<Drawable> {
    let composed = matcher::scan(grid);
    let mut drawables = analyzer::analyze(&composed);
    drawables.extend(texts.into_iter().map(Drawable::from));
    binder::bind_names(&mut drawables);
    drawables.sort_by_key(Drawable::z_order);
    drawables
}
