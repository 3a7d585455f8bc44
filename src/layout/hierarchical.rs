//! Layered top-down placement.

use ahash::{AHashMap, AHashSet};

use super::LayoutOptions;
use crate::graph::{SchemaGraph, DEFAULT_NODE_WIDTH};

const TOP_MARGIN: f64 = 50.0;

/// Place nodes in BFS layers starting from the root set.
///
/// Roots are nodes with no incoming edges; a graph with none (every
/// node sits inside a cycle) falls back to the first node in insertion
/// order as sole root. Layer k+1 holds the distinct unvisited targets
/// of layer k. Nodes the traversal never reaches form one final
/// overflow layer. Within a layer, nodes are centered around x = 0.
pub fn apply(graph: &mut SchemaGraph, options: &LayoutOptions) {
    if graph.nodes.is_empty() {
        return;
    }

    let layers = build_layers(graph);
    let step = options.node_spacing + DEFAULT_NODE_WIDTH;

    let index: AHashMap<String, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    for (layer_idx, layer) in layers.iter().enumerate() {
        let row_width = (layer.len() - 1) as f64 * step;
        let y = TOP_MARGIN + layer_idx as f64 * options.layer_spacing;

        for (slot, id) in layer.iter().enumerate() {
            if let Some(&i) = index.get(id) {
                graph.nodes[i].x = slot as f64 * step - row_width / 2.0;
                graph.nodes[i].y = y;
            }
        }
    }
}

fn build_layers(graph: &SchemaGraph) -> Vec<Vec<String>> {
    let (outgoing, incoming) = graph.adjacency_maps();

    let mut roots: Vec<String> = graph
        .nodes
        .iter()
        .filter(|n| !incoming.contains_key(&n.id))
        .map(|n| n.id.clone())
        .collect();
    if roots.is_empty() {
        roots.push(graph.nodes[0].id.clone());
    }

    let mut visited: AHashSet<String> = roots.iter().cloned().collect();
    let mut layers: Vec<Vec<String>> = Vec::new();
    let mut current = roots;

    while !current.is_empty() {
        let mut next: Vec<String> = Vec::new();
        for id in &current {
            if let Some(targets) = outgoing.get(id) {
                for target in targets {
                    if visited.insert(target.clone()) {
                        next.push(target.clone());
                    }
                }
            }
        }
        layers.push(current);
        current = next;
    }

    let unreached: Vec<String> = graph
        .nodes
        .iter()
        .filter(|n| !visited.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();
    if !unreached.is_empty() {
        layers.push(unreached);
    }

    layers
}
