//! Planar face extraction. The embedding is given by the node
//! coordinates: at every node, incident edges are ordered by angle, and
//! each face is traced by stepping to the predecessor of the arrival
//! direction in that ring. Interior faces come out with positive signed
//! area in screen coordinates (y grows downward); the outer face is the
//! negative one and is discarded.

use std::collections::{HashMap, HashSet};

use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::{multigraph::EdgeMeta, primitives::Node};

/// Faces below this area are degenerate artifacts, not polygons.
const MIN_FACE_AREA: f64 = 1e-6;

fn sorted_incidence(g: &UnGraph<Node, EdgeMeta>, n: NodeIndex) -> Vec<(NodeIndex, EdgeIndex)> {
    let mut incidence: Vec<(NodeIndex, EdgeIndex)> = g
        .edges(n)
        .map(|er| {
            let other = if er.source() == n { er.target() } else { er.source() };
            (other, er.id())
        })
        .collect();
    incidence.sort_unstable();
    incidence
}

/// Edges not lying on any cycle, via an iterative lowpoint DFS over one
/// connected component.
pub(super) fn bridges(
    g: &UnGraph<Node, EdgeMeta>,
    component: &[NodeIndex],
) -> HashSet<EdgeIndex> {
    struct Frame {
        node: NodeIndex,
        via: Option<EdgeIndex>,
        incidence: Vec<(NodeIndex, EdgeIndex)>,
        next: usize,
    }

    let mut found = HashSet::new();
    let Some(&root) = component.first() else { return found };

    let mut disc: HashMap<NodeIndex, usize> = HashMap::new();
    let mut low: HashMap<NodeIndex, usize> = HashMap::new();
    let mut timer = 0usize;

    disc.insert(root, timer);
    low.insert(root, timer);
    timer += 1;
    let mut stack =
        vec![Frame { node: root, via: None, incidence: sorted_incidence(g, root), next: 0 }];

    loop {
        let Some(frame) = stack.last_mut() else { break };

        if frame.next < frame.incidence.len() {
            let (to, via) = frame.incidence[frame.next];
            frame.next += 1;
            if Some(via) == frame.via {
                continue;
            }
            if let Some(&seen) = disc.get(&to) {
                // Back edge
                low.insert(frame.node, low[&frame.node].min(seen));
            } else {
                disc.insert(to, timer);
                low.insert(to, timer);
                timer += 1;
                stack.push(Frame {
                    node: to,
                    via: Some(via),
                    incidence: sorted_incidence(g, to),
                    next: 0,
                });
            }
            continue;
        }

        let node = frame.node;
        let via = frame.via;
        stack.pop();
        if let (Some(parent), Some(via)) = (stack.last(), via) {
            let parent_node = parent.node;
            let child_low = low[&node];
            if child_low > disc[&parent_node] {
                found.insert(via);
            }
            low.insert(parent_node, low[&parent_node].min(child_low));
        }
    }
    found
}

/// Traces every face of the (bridge-free) cycle subgraph and keeps the
/// interior ones as `(node, edge leaving it)` walks. Walks that revisit
/// a node are not simple cycles and are dropped.
pub(super) fn trace_faces(
    g: &UnGraph<Node, EdgeMeta>,
    cycle_edges: &[EdgeIndex],
) -> Vec<Vec<(NodeIndex, EdgeIndex)>> {
    let mut ring: HashMap<NodeIndex, Vec<(NodeIndex, EdgeIndex)>> = HashMap::new();
    for &e in cycle_edges {
        let Some((a, b)) = g.edge_endpoints(e) else { continue };
        ring.entry(a).or_default().push((b, e));
        ring.entry(b).or_default().push((a, e));
    }
    for (&node, neighbors) in ring.iter_mut() {
        let origin = g[node].position;
        neighbors.sort_unstable_by(|&(n1, e1), &(n2, e2)| {
            let d1 = g[n1].position - origin;
            let d2 = g[n2].position - origin;
            d1.y.atan2(d1.x)
                .total_cmp(&d2.y.atan2(d2.x))
                .then(n1.cmp(&n2))
                .then(e1.cmp(&e2))
        });
    }

    let mut half_edges: Vec<(NodeIndex, NodeIndex, EdgeIndex)> = Vec::new();
    let mut ordered = cycle_edges.to_vec();
    ordered.sort_unstable();
    for &e in &ordered {
        if let Some((a, b)) = g.edge_endpoints(e) {
            half_edges.push((a, b, e));
            half_edges.push((b, a, e));
        }
    }

    let mut faces = Vec::new();
    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    for &(u0, v0, e0) in &half_edges {
        if seen.contains(&(u0, v0)) {
            continue;
        }
        let mut walk: Vec<(NodeIndex, EdgeIndex)> = Vec::new();
        let (mut u, mut v, mut e) = (u0, v0, e0);
        loop {
            seen.insert((u, v));
            walk.push((u, e));
            let neighbors = &ring[&v];
            let Some(at) = neighbors.iter().position(|&(n, _)| n == u) else { break };
            let (w, via) = neighbors[(at + neighbors.len() - 1) % neighbors.len()];
            (u, v, e) = (v, w, via);
            if (u, v) == (u0, v0) {
                break;
            }
        }

        let distinct: HashSet<NodeIndex> = walk.iter().map(|&(n, _)| n).collect();
        if walk.len() < 3 || distinct.len() != walk.len() {
            continue;
        }
        if signed_area(g, &walk) <= MIN_FACE_AREA {
            continue;
        }
        faces.push(walk);
    }
    faces
}

fn signed_area(g: &UnGraph<Node, EdgeMeta>, walk: &[(NodeIndex, EdgeIndex)]) -> f64 {
    let mut doubled = 0.0;
    for i in 0..walk.len() {
        let p = g[walk[i].0].position;
        let q = g[walk[(i + 1) % walk.len()].0].position;
        doubled += p.x * q.y - q.x * p.y;
    }
    doubled / 2.0
}
