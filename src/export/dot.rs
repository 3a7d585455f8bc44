//! Graphviz DOT format output with pinned positions.

use crate::graph::SchemaGraph;

/// Generate DOT output preserving the layout's node coordinates.
///
/// Positions use the `pos="x,y!"` pin syntax understood by neato and
/// fdp, so a laid-out graph renders where the layout put it.
pub fn to_dot(graph: &SchemaGraph) -> String {
    let mut output = String::new();

    output.push_str(&format!("digraph {} {{\n", escape_dot_id(&graph.database)));
    output.push_str("  graph [pad=\"0.5\", nodesep=\"1\", ranksep=\"1.5\"];\n");
    output.push_str("  node [shape=box, style=filled];\n\n");

    for node in &graph.nodes {
        output.push_str(&format!(
            "  {} [label=\"{}\", pos=\"{},{}!\", fillcolor={}];\n",
            escape_dot_id(&node.id),
            escape_label(&node.label),
            node.x,
            node.y,
            node.color.as_str()
        ));
    }

    if !graph.edges.is_empty() {
        output.push('\n');
    }

    for edge in &graph.edges {
        let style = if edge.enabled { "" } else { ", style=dashed" };
        output.push_str(&format!(
            "  {} -> {} [label=\"{}→{}\"{}];\n",
            escape_dot_id(&edge.source),
            escape_dot_id(&edge.target),
            escape_label(&edge.source_column),
            escape_label(&edge.target_column),
            style
        ));
    }

    output.push_str("}\n");
    output
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') && !s.is_empty() {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// Escape a string for use inside a quoted DOT attribute
fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::layout::{apply_layout, LayoutAlgorithm, LayoutOptions};
    use crate::meta::{RelationshipMeta, TableMeta};

    fn create_test_graph() -> SchemaGraph {
        let tables = vec![
            TableMeta {
                schema: "public".to_string(),
                name: "users".to_string(),
                row_count: 10,
                columns: vec![],
            },
            TableMeta {
                schema: "public".to_string(),
                name: "orders".to_string(),
                row_count: 10,
                columns: vec![],
            },
        ];
        let relationships = vec![RelationshipMeta {
            name: "fk_orders_users".to_string(),
            source_schema: "public".to_string(),
            source_table: "orders".to_string(),
            source_column: "user_id".to_string(),
            target_schema: "public".to_string(),
            target_table: "users".to_string(),
            target_column: "id".to_string(),
            is_enabled: true,
            delete_action: String::new(),
            update_action: String::new(),
            created: None,
        }];
        build_graph("shop", &tables, &relationships)
    }

    #[test]
    fn test_dot_structure() {
        let graph = create_test_graph();
        let output = to_dot(&graph);

        assert!(output.starts_with("digraph shop {"));
        assert!(output.contains("\"public.users\" [label=\"users\""));
        assert!(output.contains("\"public.orders\" -> \"public.users\" [label=\"user_id→id\"]"));
        assert!(output.ends_with("}\n"));
    }

    #[test]
    fn test_dot_carries_positions() {
        let mut graph = create_test_graph();
        apply_layout(
            &mut graph,
            &LayoutOptions {
                algorithm: LayoutAlgorithm::Grid,
                ..Default::default()
            },
        );
        let output = to_dot(&graph);

        assert!(output.contains("pos=\"50,50!\""));
        assert!(output.contains("pos=\"200,50!\""));
    }

    #[test]
    fn test_dot_colors_by_classification() {
        let graph = create_test_graph();
        let output = to_dot(&graph);

        // users has no FK columns and few rows: a lookup table
        assert!(output.contains("fillcolor=lightgreen"));
    }

    #[test]
    fn test_disabled_edge_is_dashed() {
        let mut graph = create_test_graph();
        graph.edges[0].enabled = false;
        let output = to_dot(&graph);

        assert!(output.contains("style=dashed"));
    }
}
