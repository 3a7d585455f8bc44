//! Schema graph model and analysis.
//!
//! This module provides:
//! - The graph data model (nodes, edges, statistics)
//! - Graph construction from table/relationship metadata
//! - Cycle detection over directed foreign-key edges
//! - Filtering and bounded multi-hop neighborhood search

pub mod builder;
pub mod cycles;
pub mod filter;
pub mod neighborhood;

pub use builder::build_graph;
pub use cycles::{find_cycles, Cycle};
pub use filter::GraphFilter;
pub use neighborhood::related_tables;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use std::fmt;

/// Default node box width used by layout spacing
pub const DEFAULT_NODE_WIDTH: f64 = 120.0;
/// Default node box height
pub const DEFAULT_NODE_HEIGHT: f64 = 60.0;

/// Node classification derived from degree counts and row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Standard,
    Primary,
    Lookup,
    Orphaned,
    Junction,
}

impl NodeKind {
    /// Classify a node from its degree counts and row count.
    /// Rules are evaluated in order; the first match wins.
    pub fn classify(incoming: usize, outgoing: usize, row_count: u64) -> Self {
        if incoming == 0 && outgoing == 0 {
            NodeKind::Orphaned
        } else if outgoing >= 2 && incoming == 0 {
            NodeKind::Junction
        } else if incoming > 3 {
            NodeKind::Primary
        } else if row_count < 100 && outgoing == 0 {
            NodeKind::Lookup
        } else {
            NodeKind::Standard
        }
    }

    /// Color tag for this classification
    pub fn color(&self) -> NodeColor {
        match self {
            NodeKind::Primary | NodeKind::Standard => NodeColor::Blue,
            NodeKind::Lookup => NodeColor::Green,
            NodeKind::Junction => NodeColor::Purple,
            NodeKind::Orphaned => NodeColor::Gray,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Standard => "standard",
            NodeKind::Primary => "primary",
            NodeKind::Lookup => "lookup",
            NodeKind::Orphaned => "orphaned",
            NodeKind::Junction => "junction",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color tag attached to a node, derived from its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeColor {
    Blue,
    Green,
    Purple,
    Gray,
}

impl NodeColor {
    /// Graphviz color name for DOT output
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeColor::Blue => "lightblue",
            NodeColor::Green => "lightgreen",
            NodeColor::Purple => "plum",
            NodeColor::Gray => "lightgray",
        }
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A table in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique identifier: `schema.table`
    pub id: String,
    /// Display label (table name)
    pub label: String,
    /// Schema (namespace) name
    pub schema: String,
    /// Table name
    pub table: String,
    /// Row count at snapshot time
    pub row_count: u64,
    /// Classification from the degree/row-count decision table
    pub kind: NodeKind,
    /// Color tag derived from the classification
    pub color: NodeColor,
    /// Layout position
    pub x: f64,
    pub y: f64,
    /// Box size (rendering hint)
    pub width: f64,
    pub height: f64,
    /// UI state flags carried with the node
    pub selected: bool,
    pub highlighted: bool,
    /// True iff the node has no incoming and no outgoing edges
    pub orphaned: bool,
    /// Count of edges whose target is this node
    pub incoming: usize,
    /// Count of edges whose source is this node
    pub outgoing: usize,
    /// Primary key column names
    pub primary_keys: Vec<String>,
    /// Foreign key column names
    pub foreign_keys: Vec<String>,
}

/// Relationship cardinality of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeKind {
    /// Foreign key from a "many" table to a "one" table (the builder
    /// always emits this)
    #[default]
    OneToMany,
    OneToOne,
    ManyToMany,
}

impl EdgeKind {
    /// Mermaid erDiagram connector, read source-first
    pub fn as_mermaid(&self) -> &'static str {
        match self {
            EdgeKind::OneToMany => "}o--||",
            EdgeKind::OneToOne => "||--||",
            EdgeKind::ManyToMany => "}o--o{",
        }
    }
}

/// A foreign-key relationship in the graph.
///
/// The source is the referencing (FK-holding) node, the target the
/// referenced node.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Unique identifier: the constraint name
    pub id: String,
    /// Source node id (`schema.table`)
    pub source: String,
    /// Target node id (`schema.table`)
    pub target: String,
    /// FK column on the source table
    pub source_column: String,
    /// Referenced column on the target table
    pub target_column: String,
    /// Whether the constraint is enabled/trusted
    pub enabled: bool,
    /// ON DELETE action
    pub delete_action: String,
    /// ON UPDATE action
    pub update_action: String,
    /// Relationship cardinality
    pub kind: EdgeKind,
    /// Line thickness (rendering hint)
    pub thickness: f64,
}

/// Derived counts over a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub table_count: usize,
    pub relationship_count: usize,
    pub orphan_count: usize,
    pub disabled_count: usize,
    pub cycle_count: usize,
}

/// In-memory graph of tables and foreign-key relationships for one
/// database snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaGraph {
    /// Source database name
    pub database: String,
    /// When this graph was built
    pub generated_at: DateTime<Utc>,
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Edges in insertion order
    pub edges: Vec<Edge>,
    /// Derived statistics (see `recompute_statistics`)
    pub stats: Statistics,
}

impl SchemaGraph {
    /// Create an empty graph for the given database
    pub fn new(database: &str) -> Self {
        SchemaGraph {
            database: database.to_string(),
            generated_at: Utc::now(),
            nodes: Vec::new(),
            edges: Vec::new(),
            stats: Statistics::default(),
        }
    }

    /// Look up a node by id, falling back to a bare table name.
    /// Both comparisons are case-insensitive.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.id.eq_ignore_ascii_case(id))
            .or_else(|| {
                self.nodes
                    .iter()
                    .find(|n| n.table.eq_ignore_ascii_case(id))
            })
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build outgoing and incoming adjacency maps keyed by canonical node
    /// id. Edges with a missing endpoint are skipped.
    pub fn adjacency_maps(
        &self,
    ) -> (AHashMap<String, Vec<String>>, AHashMap<String, Vec<String>>) {
        let ids: AHashMap<String, &str> = self
            .nodes
            .iter()
            .map(|n| (n.id.to_ascii_lowercase(), n.id.as_str()))
            .collect();

        let mut outgoing: AHashMap<String, Vec<String>> = AHashMap::new();
        let mut incoming: AHashMap<String, Vec<String>> = AHashMap::new();

        for edge in &self.edges {
            let source = ids.get(&edge.source.to_ascii_lowercase());
            let target = ids.get(&edge.target.to_ascii_lowercase());
            if let (Some(&source), Some(&target)) = (source, target) {
                outgoing
                    .entry(source.to_string())
                    .or_default()
                    .push(target.to_string());
                incoming
                    .entry(target.to_string())
                    .or_default()
                    .push(source.to_string());
            }
        }

        (outgoing, incoming)
    }

    /// Re-derive everything computed from the current node/edge lists:
    /// per-node degree counts, orphan flags, classifications, colors, and
    /// the statistics block (including the cycle count).
    ///
    /// Edges referencing a missing node never contribute to degrees or
    /// orphan status; they stay in the edge list and are counted in
    /// `relationship_count`.
    pub fn recompute_statistics(&mut self) {
        let ids: AHashMap<String, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.to_ascii_lowercase(), i))
            .collect();

        let mut incoming = vec![0usize; self.nodes.len()];
        let mut outgoing = vec![0usize; self.nodes.len()];

        for edge in &self.edges {
            let source = ids.get(&edge.source.to_ascii_lowercase());
            let target = ids.get(&edge.target.to_ascii_lowercase());
            if let (Some(&source), Some(&target)) = (source, target) {
                outgoing[source] += 1;
                incoming[target] += 1;
            }
        }

        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.incoming = incoming[i];
            node.outgoing = outgoing[i];
            node.orphaned = incoming[i] == 0 && outgoing[i] == 0;
            node.kind = NodeKind::classify(node.incoming, node.outgoing, node.row_count);
            node.color = node.kind.color();
        }

        let cycle_count = cycles::find_cycles(self).len();

        self.stats = Statistics {
            table_count: self.nodes.len(),
            relationship_count: self.edges.len(),
            orphan_count: self.nodes.iter().filter(|n| n.orphaned).count(),
            disabled_count: self.edges.iter().filter(|e| !e.enabled).count(),
            cycle_count,
        };
    }
}
