//! Criteria-based graph subsetting.

use ahash::AHashSet;

use super::{Edge, Node, SchemaGraph};

/// Filter criteria applied to a graph. A node survives only if it
/// matches every specified criterion; unspecified criteria (empty sets,
/// full row range) match everything.
#[derive(Debug, Clone)]
pub struct GraphFilter {
    /// Schemas to include (empty = all)
    pub schemas: AHashSet<String>,
    /// Schemas to exclude
    pub exclude_schemas: AHashSet<String>,
    /// Explicit node ids to include (empty = all)
    pub tables: AHashSet<String>,
    /// Keep only orphaned nodes
    pub orphans_only: bool,
    /// Minimum row count, inclusive
    pub min_rows: u64,
    /// Maximum row count, inclusive
    pub max_rows: u64,
}

impl Default for GraphFilter {
    fn default() -> Self {
        GraphFilter {
            schemas: AHashSet::new(),
            exclude_schemas: AHashSet::new(),
            tables: AHashSet::new(),
            orphans_only: false,
            min_rows: 0,
            max_rows: u64::MAX,
        }
    }
}

impl GraphFilter {
    /// Check whether any criterion is specified
    pub fn is_active(&self) -> bool {
        !self.schemas.is_empty()
            || !self.exclude_schemas.is_empty()
            || !self.tables.is_empty()
            || self.orphans_only
            || self.min_rows > 0
            || self.max_rows < u64::MAX
    }

    /// Check a single node against all specified criteria.
    /// Name comparisons are case-insensitive.
    pub fn matches(&self, node: &Node) -> bool {
        if !self.schemas.is_empty()
            && !self
                .schemas
                .iter()
                .any(|s| s.eq_ignore_ascii_case(&node.schema))
        {
            return false;
        }
        if self
            .exclude_schemas
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&node.schema))
        {
            return false;
        }
        if !self.tables.is_empty()
            && !self.tables.iter().any(|t| t.eq_ignore_ascii_case(&node.id))
        {
            return false;
        }
        if self.orphans_only && !node.orphaned {
            return false;
        }
        node.row_count >= self.min_rows && node.row_count <= self.max_rows
    }

    /// Project the graph down to matching nodes and the edges whose both
    /// endpoints survive.
    ///
    /// This is a structural projection: node degree counts,
    /// classifications, and the statistics block are carried over
    /// unchanged. Callers wanting post-filter numbers re-derive them
    /// with `SchemaGraph::recompute_statistics`.
    pub fn apply(&self, graph: &SchemaGraph) -> SchemaGraph {
        let nodes: Vec<Node> = graph
            .nodes
            .iter()
            .filter(|n| self.matches(n))
            .cloned()
            .collect();

        let keep: AHashSet<String> = nodes.iter().map(|n| n.id.to_ascii_lowercase()).collect();
        let edges: Vec<Edge> = graph
            .edges
            .iter()
            .filter(|e| {
                keep.contains(&e.source.to_ascii_lowercase())
                    && keep.contains(&e.target.to_ascii_lowercase())
            })
            .cloned()
            .collect();

        SchemaGraph {
            database: graph.database.clone(),
            generated_at: graph.generated_at,
            nodes,
            edges,
            stats: graph.stats,
        }
    }
}
