//! Spatial layout algorithms for schema graphs.
//!
//! Each algorithm assigns `(x, y)` to every node in place and never
//! changes node or edge identity. Layout is infallible; an empty graph
//! is a no-op.

mod circular;
mod force;
mod grid;
mod hierarchical;

use std::fmt;
use std::str::FromStr;

use crate::graph::SchemaGraph;

/// Layout algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutAlgorithm {
    /// Layered top-down placement by BFS distance from root nodes
    #[default]
    Hierarchical,
    /// All nodes on one circle
    Circular,
    /// Spring-electrical simulation from seeded random positions
    ForceDirected,
    /// Row-major square grid
    Grid,
}

impl FromStr for LayoutAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hierarchical" | "hierarchy" | "layered" | "tree" => Ok(LayoutAlgorithm::Hierarchical),
            "circular" | "circle" | "radial" => Ok(LayoutAlgorithm::Circular),
            "force" | "force-directed" | "spring" => Ok(LayoutAlgorithm::ForceDirected),
            "grid" => Ok(LayoutAlgorithm::Grid),
            _ => Err(format!(
                "Unknown layout algorithm: {}. Valid options: hierarchical, circular, force, grid",
                s
            )),
        }
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutAlgorithm::Hierarchical => write!(f, "hierarchical"),
            LayoutAlgorithm::Circular => write!(f, "circular"),
            LayoutAlgorithm::ForceDirected => write!(f, "force"),
            LayoutAlgorithm::Grid => write!(f, "grid"),
        }
    }
}

/// Options shared by all layout algorithms
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub algorithm: LayoutAlgorithm,
    /// Horizontal gap between node boxes in a hierarchical layer
    pub node_spacing: f64,
    /// Vertical gap between hierarchical layers
    pub layer_spacing: f64,
    /// Accepted for callers that group by schema; placement currently
    /// ignores it
    pub group_by_schema: bool,
    /// Accepted for callers that reorder within layers; placement
    /// currently ignores it
    pub minimize_crossings: bool,
    /// Seed for the force-directed initial positions
    pub seed: u64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            algorithm: LayoutAlgorithm::default(),
            node_spacing: 50.0,
            layer_spacing: 150.0,
            group_by_schema: false,
            minimize_crossings: false,
            seed: 42,
        }
    }
}

/// Assign coordinates to every node under the selected algorithm
pub fn apply_layout(graph: &mut SchemaGraph, options: &LayoutOptions) {
    if graph.nodes.is_empty() {
        return;
    }

    match options.algorithm {
        LayoutAlgorithm::Hierarchical => hierarchical::apply(graph, options),
        LayoutAlgorithm::Circular => circular::apply(graph),
        LayoutAlgorithm::ForceDirected => force::apply(graph, options),
        LayoutAlgorithm::Grid => grid::apply(graph),
    }
}
