//! Spring-electrical force simulation.

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use super::LayoutOptions;
use crate::graph::SchemaGraph;

const ITERATIONS: usize = 100;
const REPULSION: f64 = 50_000.0;
const ATTRACTION: f64 = 0.01;
const DAMPING: f64 = 0.9;
/// Minimum distance; keeps coincident nodes from dividing by zero
const EPSILON: f64 = 0.01;
const INITIAL_WIDTH: f64 = 800.0;
const INITIAL_HEIGHT: f64 = 600.0;

/// Iterative spring-electrical placement.
///
/// Nodes start at seeded pseudo-random positions, then run a fixed
/// number of iterations where every node pair repels with magnitude
/// `REPULSION / d²` and every edge pulls its endpoints together with a
/// linear spring `ATTRACTION · d`. Per-iteration displacement is damped
/// before being applied. Deterministic for a fixed seed and node order.
pub fn apply(graph: &mut SchemaGraph, options: &LayoutOptions) {
    let n = graph.nodes.len();
    if n == 0 {
        return;
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    for node in &mut graph.nodes {
        node.x = rng.random_range(0.0..INITIAL_WIDTH);
        node.y = rng.random_range(0.0..INITIAL_HEIGHT);
    }

    // Resolve edges to node indices once; dangling edges exert no force
    let index: AHashMap<String, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.to_ascii_lowercase(), i))
        .collect();
    let springs: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let source = index.get(&edge.source.to_ascii_lowercase())?;
            let target = index.get(&edge.target.to_ascii_lowercase())?;
            Some((*source, *target))
        })
        .collect();

    let mut displacement = vec![(0.0f64, 0.0f64); n];

    for _ in 0..ITERATIONS {
        for d in displacement.iter_mut() {
            *d = (0.0, 0.0);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = graph.nodes[i].x - graph.nodes[j].x;
                let dy = graph.nodes[i].y - graph.nodes[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(EPSILON);
                let force = REPULSION / (dist * dist);
                let fx = force * dx / dist;
                let fy = force * dy / dist;
                displacement[i].0 += fx;
                displacement[i].1 += fy;
                displacement[j].0 -= fx;
                displacement[j].1 -= fy;
            }
        }

        for &(source, target) in &springs {
            let dx = graph.nodes[target].x - graph.nodes[source].x;
            let dy = graph.nodes[target].y - graph.nodes[source].y;
            let fx = dx * ATTRACTION;
            let fy = dy * ATTRACTION;
            displacement[source].0 += fx;
            displacement[source].1 += fy;
            displacement[target].0 -= fx;
            displacement[target].1 -= fy;
        }

        for (i, node) in graph.nodes.iter_mut().enumerate() {
            node.x += displacement[i].0 * DAMPING;
            node.y += displacement[i].1 * DAMPING;
        }
    }
}
