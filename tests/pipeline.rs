//! End-to-end runs of the full pipeline over small diagrams.

use linework::{Cell, Drawable, Grid, OpenGraph, Point, Polygon, Text, vectorize};

fn run(rows: &[&str]) -> Vec<Drawable> {
    run_with_texts(rows, Vec::new())
}

fn run_with_texts(rows: &[&str], texts: Vec<Text>) -> Vec<Drawable> {
    let _ = env_logger::builder().is_test(true).try_init();
    vectorize(&Grid::from_rows(rows), texts)
}

fn polygons(drawables: &[Drawable]) -> Vec<&Polygon> {
    drawables.iter().filter_map(Drawable::as_polygon).collect()
}

fn open_graphs(drawables: &[Drawable]) -> Vec<&OpenGraph> {
    drawables.iter().filter_map(Drawable::as_open_graph).collect()
}

#[test]
fn single_line() {
    let drawables = run(&["---"]);
    assert!(polygons(&drawables).is_empty());

    let graphs = open_graphs(&drawables);
    let [graph] = graphs.as_slice() else { panic!("expected one open graph") };
    let [path] = graph.paths() else { panic!("expected one fused path") };
    assert_eq!(path.len(), 4);
    assert!(path.first().unwrap().position.approx_eq(Point::new(0.0, 0.5)));
    assert!(path.last().unwrap().position.approx_eq(Point::new(3.0, 0.5)));
}

#[test]
fn simple_box() {
    let drawables = run(&["+-+", "| |", "+-+"]);
    assert!(open_graphs(&drawables).is_empty());

    let faces = polygons(&drawables);
    let [polygon] = faces.as_slice() else { panic!("expected one polygon") };
    for (x, y) in [(0.5, 0.5), (2.5, 0.5), (2.5, 2.5), (0.5, 2.5)] {
        let corner = Point::new(x, y);
        assert!(
            polygon.nodes().iter().any(|n| !n.fusable && n.position.approx_eq(corner)),
            "missing corner {corner}"
        );
    }
    assert_eq!(drawables[0].z_order(), 0);
}

#[test]
fn nested_boxes() {
    let drawables = run(&[
        "+-----+",
        "| +-+ |",
        "| | | |",
        "| +-+ |",
        "+-----+",
    ]);
    let polygons = polygons(&drawables);
    assert_eq!(polygons.len(), 2);

    // Back-to-front output: the containing box comes first
    assert!(polygons[0].contains(polygons[1]));
    assert_eq!(drawables[0].z_order(), 0);
    assert_eq!(drawables[1].z_order(), 1);
}

#[test]
fn crossing_lines() {
    let drawables = run(&[" | ", "-|-", " | "]);
    assert_eq!(open_graphs(&drawables).len(), 2);
    assert!(polygons(&drawables).is_empty());

    let vertical = drawables
        .iter()
        .find(|d| d.has_edge(Point::new(1.5, 1.0), Point::new(1.5, 2.0)))
        .unwrap();
    let horizontal = drawables
        .iter()
        .find(|d| d.has_edge(Point::new(1.0, 1.5), Point::new(2.0, 1.5)))
        .unwrap();
    assert_eq!(horizontal.z_order(), 0, "the annotating line stays below");
    assert_eq!(vertical.z_order(), 1, "the crossed line is drawn above");
}

#[test]
fn curve_corner() {
    let drawables = run(&["*-", "| "]);
    let graphs = open_graphs(&drawables);
    let [graph] = graphs.as_slice() else { panic!("expected one open graph") };
    let [path] = graph.paths() else { panic!("expected one path") };

    assert_eq!(path.len(), 5);
    let corner = path
        .iter()
        .find(|n| n.position.approx_eq(Point::new(0.5, 0.5)))
        .expect("corner node present");
    assert!(corner.style.is_curve());

    let ends = [path.first().unwrap().position, path.last().unwrap().position];
    assert!(ends.iter().any(|p| p.approx_eq(Point::new(2.0, 0.5))));
    assert!(ends.iter().any(|p| p.approx_eq(Point::new(0.5, 2.0))));
}

#[test]
fn text_in_box() {
    let drawables =
        run_with_texts(&["+--+", "|  |", "+--+"], vec![Text::new(Cell::new(1, 1), "hi")]);

    let polygon = drawables.iter().find(|d| d.is_polygon()).unwrap();
    assert!(polygon.names().contains(&"hi".to_string()));

    let text = drawables.iter().find(|d| d.is_text()).unwrap();
    assert_eq!(text.z_order(), polygon.z_order() + 1);
    assert!(text.names().contains(&"hi".to_string()));

    // Back-to-front: the text sorts after the polygon it labels
    assert!(drawables.last().unwrap().is_text());
}

#[test]
fn empty_grid_yields_nothing() {
    assert!(run(&[]).is_empty());
    assert!(run(&["", ""]).is_empty());
    assert!(run(&["   ", "   "]).is_empty());
}

#[test]
fn unmatched_characters_contribute_nothing() {
    assert!(run(&["q w e"]).is_empty());
}

#[test]
fn arrowed_line_extends_into_the_arrow_cell() {
    let drawables = run(&[">--"]);
    let graphs = open_graphs(&drawables);
    let [graph] = graphs.as_slice() else { panic!("expected one open graph") };
    let [path] = graph.paths() else { panic!("expected one path") };
    assert_eq!(path.len(), 4);
    let ends = [path.first().unwrap().position, path.last().unwrap().position];
    assert!(ends.iter().any(|p| p.approx_eq(Point::new(0.0, 0.5))));
    assert!(ends.iter().any(|p| p.approx_eq(Point::new(3.0, 0.5))));
}

#[test]
fn bracket_interrupts_a_line() {
    // The bracket sub-path must stay a separate drawable from the line
    let drawables = run(&["-[-"]);
    let graphs = open_graphs(&drawables);
    assert!(graphs.len() >= 2, "bracket and line may not merge");

    let bracket_notch = Point::new(1.25, 0.25);
    assert!(
        graphs
            .iter()
            .any(|g| g.nodes().iter().any(|n| n.position.approx_eq(bracket_notch))),
        "bracket notch missing"
    );
}
