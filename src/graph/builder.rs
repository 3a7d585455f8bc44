//! Graph construction from table and relationship metadata.

use ahash::AHashMap;

use super::{
    Edge, EdgeKind, Node, NodeColor, NodeKind, SchemaGraph, DEFAULT_NODE_HEIGHT,
    DEFAULT_NODE_WIDTH,
};
use crate::meta::{RelationshipMeta, TableMeta};

/// Build a fully-populated graph from metadata.
///
/// Nodes are created in table order, edges in relationship order. A
/// duplicate constraint name replaces the earlier edge in place (source
/// data guarantees constraint names are unique per database, so this is
/// a guard, not a merge strategy). Degree counts, classifications, and
/// statistics are derived afterwards from the finished lists.
pub fn build_graph(
    database: &str,
    tables: &[TableMeta],
    relationships: &[RelationshipMeta],
) -> SchemaGraph {
    let mut graph = SchemaGraph::new(database);

    graph.nodes = tables.iter().map(node_from_table).collect();

    let mut edge_index: AHashMap<String, usize> = AHashMap::new();
    for rel in relationships {
        let edge = edge_from_relationship(rel);
        match edge_index.get(&rel.name) {
            Some(&i) => graph.edges[i] = edge,
            None => {
                edge_index.insert(rel.name.clone(), graph.edges.len());
                graph.edges.push(edge);
            }
        }
    }

    graph.recompute_statistics();
    graph
}

fn node_from_table(table: &TableMeta) -> Node {
    Node {
        id: table.node_id(),
        label: table.name.clone(),
        schema: table.schema.clone(),
        table: table.name.clone(),
        row_count: table.row_count,
        kind: NodeKind::Standard,
        color: NodeColor::Blue,
        x: 0.0,
        y: 0.0,
        width: DEFAULT_NODE_WIDTH,
        height: DEFAULT_NODE_HEIGHT,
        selected: false,
        highlighted: false,
        orphaned: false,
        incoming: 0,
        outgoing: 0,
        primary_keys: table.primary_key_columns(),
        foreign_keys: table.foreign_key_columns(),
    }
}

fn edge_from_relationship(rel: &RelationshipMeta) -> Edge {
    Edge {
        id: rel.name.clone(),
        source: rel.source_node_id(),
        target: rel.target_node_id(),
        source_column: rel.source_column.clone(),
        target_column: rel.target_column.clone(),
        enabled: rel.is_enabled,
        delete_action: rel.delete_action.clone(),
        update_action: rel.update_action.clone(),
        kind: EdgeKind::OneToMany,
        thickness: 1.0,
    }
}
