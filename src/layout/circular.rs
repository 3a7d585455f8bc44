//! Single-circle placement.

use std::f64::consts::PI;

use crate::graph::SchemaGraph;

const MIN_RADIUS: f64 = 200.0;
const RADIUS_PER_NODE: f64 = 30.0;

/// Place all nodes on a circle around the origin at equal angular
/// increments, in node list order. The radius grows with the node count
/// so boxes stay readable on large graphs.
pub fn apply(graph: &mut SchemaGraph) {
    let n = graph.nodes.len();
    if n == 0 {
        return;
    }

    let radius = (n as f64 * RADIUS_PER_NODE).max(MIN_RADIUS);
    let step = 2.0 * PI / n as f64;

    for (i, node) in graph.nodes.iter_mut().enumerate() {
        let angle = i as f64 * step;
        node.x = radius * angle.cos();
        node.y = radius * angle.sin();
    }
}
