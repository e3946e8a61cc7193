//! Decomposes the composed multigraph into drawables: faces of the
//! planar embedding become polygons, the bridge residue becomes open
//! graphs, and a topological layering over containment and `top_of`
//! constraints assigns the z-order.

use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;
use log::debug;
use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::{
    drawable::{Drawable, OpenGraph, Polygon},
    multigraph::{EdgeMeta, Multigraph},
    primitives::Node,
};

mod faces;
mod zorder;

/// Turns the composed graph into polygons and open graphs with assigned
/// z-orders. The result is ordered open graphs first, then polygons,
/// both in discovery order.
pub fn analyze(mg: &Multigraph) -> Vec<Drawable> {
    let g = mg.graph();

    let mut open_entries: Vec<(OpenGraph, Vec<EdgeIndex>)> = Vec::new();
    let mut poly_entries: Vec<(Polygon, Vec<EdgeIndex>)> = Vec::new();

    for component in components(g) {
        let members: HashSet<NodeIndex> = component.iter().copied().collect();
        let mut edges: Vec<EdgeIndex> = g
            .edge_references()
            .filter(|er| members.contains(&er.source()))
            .map(|er| er.id())
            .collect();
        edges.sort_unstable();
        if edges.is_empty() {
            continue;
        }

        let bridge_set = faces::bridges(g, &component);
        let cycle_edges: Vec<EdgeIndex> =
            edges.iter().copied().filter(|e| !bridge_set.contains(e)).collect();

        for walk in faces::trace_faces(g, &cycle_edges) {
            let nodes = walk.iter().map(|&(n, _)| g[n]).collect();
            let face_edges = walk.iter().map(|&(_, e)| e).collect();
            poly_entries.push((Polygon::new(nodes), face_edges));
        }

        let residual: Vec<EdgeIndex> =
            edges.iter().copied().filter(|e| bridge_set.contains(e)).collect();
        for group in edge_groups(g, &residual) {
            open_entries.push((open_graph(g, &group), group));
        }
    }

    debug!(
        target: "analyzer",
        "{} polygons, {} open graphs",
        poly_entries.len(),
        open_entries.len()
    );

    let z = {
        let entries: Vec<zorder::ZEntry> = open_entries
            .iter()
            .map(|(_, edges)| zorder::ZEntry { edges, polygon: None })
            .chain(
                poly_entries
                    .iter()
                    .map(|(polygon, edges)| zorder::ZEntry { edges, polygon: Some(polygon) }),
            )
            .collect();
        zorder::assign(mg, &entries)
    };

    let open_count = open_entries.len();
    let mut drawables: Vec<Drawable> = Vec::with_capacity(z.len());
    for (i, (graph, _)) in open_entries.into_iter().enumerate() {
        let mut drawable = Drawable::from(graph);
        drawable.set_z_order(z[i]);
        drawables.push(drawable);
    }
    for (i, (polygon, _)) in poly_entries.into_iter().enumerate() {
        let mut drawable = Drawable::from(polygon);
        drawable.set_z_order(z[open_count + i]);
        drawables.push(drawable);
    }
    drawables
}

fn components(g: &UnGraph<Node, EdgeMeta>) -> Vec<Vec<NodeIndex>> {
    let mut assigned = vec![false; g.node_count()];
    let mut result: Vec<Vec<NodeIndex>> = Vec::new();

    for start in g.node_indices() {
        if assigned[start.index()] {
            continue;
        }
        assigned[start.index()] = true;
        let mut queue = vec![start];
        let mut nodes = Vec::new();
        while let Some(n) = queue.pop() {
            nodes.push(n);
            for m in g.neighbors(n) {
                if !assigned[m.index()] {
                    assigned[m.index()] = true;
                    queue.push(m);
                }
            }
        }
        nodes.sort_unstable();
        result.push(nodes);
    }
    result
}

/// Splits a residual edge set into its connected groups.
fn edge_groups(g: &UnGraph<Node, EdgeMeta>, residual: &[EdgeIndex]) -> Vec<Vec<EdgeIndex>> {
    let adjacency = adjacency_of(g, residual);

    let mut groups = Vec::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    for &start in adjacency.keys() {
        if !visited.insert(start) {
            continue;
        }
        let mut queue = vec![start];
        let mut group: HashSet<EdgeIndex> = HashSet::new();
        while let Some(n) = queue.pop() {
            for &(m, e) in &adjacency[&n] {
                group.insert(e);
                if visited.insert(m) {
                    queue.push(m);
                }
            }
        }
        let mut edges: Vec<EdgeIndex> = group.into_iter().collect();
        edges.sort_unstable();
        groups.push(edges);
    }
    groups
}

fn adjacency_of(
    g: &UnGraph<Node, EdgeMeta>,
    edges: &[EdgeIndex],
) -> BTreeMap<NodeIndex, Vec<(NodeIndex, EdgeIndex)>> {
    let mut adjacency: BTreeMap<NodeIndex, Vec<(NodeIndex, EdgeIndex)>> = BTreeMap::new();
    for &e in edges {
        let Some((a, b)) = g.edge_endpoints(e) else { continue };
        adjacency.entry(a).or_default().push((b, e));
        adjacency.entry(b).or_default().push((a, e));
    }
    for list in adjacency.values_mut() {
        list.sort_unstable();
    }
    adjacency
}

fn open_graph(g: &UnGraph<Node, EdgeMeta>, edges: &[EdgeIndex]) -> OpenGraph {
    let adjacency = adjacency_of(g, edges);
    let paths = trails(&adjacency)
        .into_iter()
        .map(|trail| trail.into_iter().map(|n| g[n]).collect())
        .collect();

    let nodes = adjacency.keys().map(|&n| g[n]).collect();
    let edge_pairs = edges
        .iter()
        .filter_map(|&e| g.edge_endpoints(e).map(|(a, b)| (g[a], g[b])))
        .collect();
    OpenGraph::new(nodes, edge_pairs, paths)
}

/// Maximal-trail decomposition. Each trail starts at an odd-degree node
/// when one remains (else at the smallest node with unused edges) and
/// always follows the smallest unused edge; a trail that comes back to
/// its start is a closed path.
fn trails(adjacency: &BTreeMap<NodeIndex, Vec<(NodeIndex, EdgeIndex)>>) -> Vec<Vec<NodeIndex>> {
    let mut unused: HashSet<EdgeIndex> =
        adjacency.values().flatten().map(|&(_, e)| e).collect();
    let mut paths = Vec::new();

    while !unused.is_empty() {
        let remaining_degree =
            |n: &NodeIndex| adjacency[n].iter().filter(|(_, e)| unused.contains(e)).count();
        let Some(start) = adjacency
            .keys()
            .copied()
            .filter(|n| remaining_degree(n) > 0)
            .find_or_first(|n| remaining_degree(n) % 2 == 1)
        else {
            break;
        };

        let mut path = vec![start];
        let mut current = start;
        while let Some(&(to, via)) =
            adjacency[&current].iter().find(|(_, e)| unused.contains(e))
        {
            unused.remove(&via);
            path.push(to);
            current = to;
        }
        paths.push(path);
    }
    paths
}
