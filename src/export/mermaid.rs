//! Mermaid erDiagram format output.

use crate::graph::SchemaGraph;

/// Generate a Mermaid erDiagram from a graph.
///
/// Node metadata here is table-level (the graph does not carry full
/// column definitions), so entities render as bare blocks and the FK
/// column appears as the relationship label.
pub fn to_mermaid(graph: &SchemaGraph) -> String {
    let mut output = String::new();

    output.push_str("erDiagram\n");

    for node in &graph.nodes {
        let safe_name = escape_mermaid_id(&node.id);
        output.push_str(&format!("    {} {{\n    }}\n", safe_name));
    }

    if !graph.edges.is_empty() {
        output.push('\n');
    }

    for edge in &graph.edges {
        let source = escape_mermaid_id(&edge.source);
        let target = escape_mermaid_id(&edge.target);
        let connector = edge.kind.as_mermaid();

        output.push_str(&format!(
            "    {} {} {} : \"{}\"\n",
            source, connector, target, edge.source_column
        ));
    }

    output
}

/// Escape a string for use as a Mermaid entity ID
fn escape_mermaid_id(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
