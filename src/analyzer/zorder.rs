//! The "below" digraph over drawables and its topological layering.
//! Containers sit below their contents; an edge annotated `top_of`
//! places its owner below the owner of the referenced edge.

use std::collections::{HashMap, HashSet};

use log::warn;
use petgraph::{
    Direction::{Incoming, Outgoing},
    algo::tarjan_scc,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};

use crate::{drawable::Polygon, multigraph::Multigraph};

pub(super) struct ZEntry<'a> {
    pub edges: &'a [EdgeIndex],
    pub polygon: Option<&'a Polygon>,
}

/// Assigns one z value per entry: repeated rounds of extracting every
/// drawable without a predecessor, all members of a round sharing the
/// round's z. Cycles are warned about and broken first.
pub(super) fn assign(mg: &Multigraph, entries: &[ZEntry]) -> Vec<usize> {
    let mut below = DiGraph::<usize, ()>::new();
    let ids: Vec<NodeIndex> = (0..entries.len()).map(|i| below.add_node(i)).collect();

    let mut owners: HashMap<EdgeIndex, Vec<usize>> = HashMap::new();
    for (i, entry) in entries.iter().enumerate() {
        for &e in entry.edges {
            owners.entry(e).or_default().push(i);
        }
    }

    for (i, a) in entries.iter().enumerate() {
        let Some(container) = a.polygon else { continue };
        for (j, b) in entries.iter().enumerate() {
            if i == j {
                continue;
            }
            let Some(contained) = b.polygon else { continue };
            if container.contains(contained) {
                below.update_edge(ids[i], ids[j], ());
            }
        }
    }

    // The owner of the referenced edge is drawn above the annotating one
    for (i, entry) in entries.iter().enumerate() {
        for &e in entry.edges {
            let Some(reference) = mg.graph()[e].top_of else { continue };
            // An annotation nothing resolves to is ignored
            let Some(target) = mg.find_edge_between(reference.a, reference.b) else {
                continue;
            };
            let Some(target_owners) = owners.get(&target) else { continue };
            for &j in target_owners {
                if j != i {
                    below.update_edge(ids[i], ids[j], ());
                }
            }
        }
    }

    break_cycles(&mut below);
    layer(&below, entries.len())
}

fn break_cycles(below: &mut DiGraph<usize, ()>) {
    let mut warned = false;
    loop {
        let mut cyclic: Vec<Vec<NodeIndex>> =
            tarjan_scc(&*below).into_iter().filter(|scc| scc.len() > 1).collect();
        if cyclic.is_empty() {
            return;
        }
        if !warned {
            warn!(target: "analyzer", "ambiguous z-order; estimating");
            warned = true;
        }

        cyclic.sort_by_key(|scc| scc.iter().map(|&n| below[n]).min());
        let members: HashSet<NodeIndex> = cyclic[0].iter().copied().collect();
        let victim = below
            .edge_references()
            .filter(|er| members.contains(&er.source()) && members.contains(&er.target()))
            .min_by_key(|er| (below[er.source()], below[er.target()]))
            .map(|er| er.id());
        match victim {
            Some(edge) => {
                below.remove_edge(edge);
            }
            None => return,
        }
    }
}

fn layer(below: &DiGraph<usize, ()>, count: usize) -> Vec<usize> {
    let mut indegree: Vec<usize> = (0..count)
        .map(|i| below.neighbors_directed(NodeIndex::new(i), Incoming).count())
        .collect();
    let mut z = vec![0usize; count];
    let mut placed = vec![false; count];

    let mut level = 0usize;
    loop {
        let frontier: Vec<usize> =
            (0..count).filter(|&i| !placed[i] && indegree[i] == 0).collect();
        if frontier.is_empty() {
            break;
        }
        for &i in &frontier {
            z[i] = level;
            placed[i] = true;
        }
        for &i in &frontier {
            for succ in below.neighbors_directed(NodeIndex::new(i), Outgoing) {
                indegree[succ.index()] -= 1;
            }
        }
        level += 1;
    }
    z
}
