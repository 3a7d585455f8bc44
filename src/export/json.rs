//! JSON format output for graph data.

use schemars::JsonSchema;
use serde::Serialize;

use crate::graph::SchemaGraph;

/// JSON representation of a positioned graph
#[derive(Debug, Serialize, JsonSchema)]
pub struct GraphJson {
    pub database: String,
    /// Build timestamp, RFC 3339
    pub generated_at: String,
    pub nodes: Vec<NodeJson>,
    pub edges: Vec<EdgeJson>,
    pub stats: StatsJson,
}

/// JSON representation of a node
#[derive(Debug, Serialize, JsonSchema)]
pub struct NodeJson {
    pub id: String,
    pub label: String,
    pub schema: String,
    pub table: String,
    pub row_count: u64,
    pub kind: String,
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub orphaned: bool,
    pub incoming: usize,
    pub outgoing: usize,
    pub primary_keys: Vec<String>,
    pub foreign_keys: Vec<String>,
}

/// JSON representation of an edge
#[derive(Debug, Serialize, JsonSchema)]
pub struct EdgeJson {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_column: String,
    pub target_column: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub delete_action: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub update_action: String,
}

/// Graph statistics
#[derive(Debug, Serialize, JsonSchema)]
pub struct StatsJson {
    pub table_count: usize,
    pub relationship_count: usize,
    pub orphan_count: usize,
    pub disabled_count: usize,
    pub cycle_count: usize,
}

/// Generate JSON output from a graph
pub fn to_json(graph: &SchemaGraph) -> String {
    let doc = build_graph_json(graph);
    serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_graph_json(graph: &SchemaGraph) -> GraphJson {
    let nodes: Vec<NodeJson> = graph
        .nodes
        .iter()
        .map(|n| NodeJson {
            id: n.id.clone(),
            label: n.label.clone(),
            schema: n.schema.clone(),
            table: n.table.clone(),
            row_count: n.row_count,
            kind: n.kind.to_string(),
            color: n.color.to_string(),
            x: n.x,
            y: n.y,
            width: n.width,
            height: n.height,
            orphaned: n.orphaned,
            incoming: n.incoming,
            outgoing: n.outgoing,
            primary_keys: n.primary_keys.clone(),
            foreign_keys: n.foreign_keys.clone(),
        })
        .collect();

    let edges: Vec<EdgeJson> = graph
        .edges
        .iter()
        .map(|e| EdgeJson {
            id: e.id.clone(),
            source: e.source.clone(),
            target: e.target.clone(),
            source_column: e.source_column.clone(),
            target_column: e.target_column.clone(),
            enabled: e.enabled,
            delete_action: e.delete_action.clone(),
            update_action: e.update_action.clone(),
        })
        .collect();

    GraphJson {
        database: graph.database.clone(),
        generated_at: graph.generated_at.to_rfc3339(),
        nodes,
        edges,
        stats: StatsJson {
            table_count: graph.stats.table_count,
            relationship_count: graph.stats.relationship_count,
            orphan_count: graph.stats.orphan_count,
            disabled_count: graph.stats.disabled_count,
            cycle_count: graph.stats.cycle_count,
        },
    }
}
