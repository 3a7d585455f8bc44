//! Bounded multi-hop neighborhood search.

use ahash::AHashSet;
use std::collections::VecDeque;

use super::SchemaGraph;

/// Find every node within `depth` hops of `start`, plus the start node
/// itself. Edges are followed in both directions.
///
/// Breadth-first with a visited set, so each node is included at most
/// once and cyclic graphs terminate. Depth 0 returns exactly the start
/// node; an unknown start id returns an empty set.
pub fn related_tables(graph: &SchemaGraph, start: &str, depth: usize) -> AHashSet<String> {
    let mut result = AHashSet::new();

    let Some(start_node) = graph.node(start) else {
        return result;
    };
    let start_id = start_node.id.clone();
    result.insert(start_id.clone());

    let (outgoing, incoming) = graph.adjacency_maps();

    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    queue.push_back((start_id, 0));

    while let Some((current, hop)) = queue.pop_front() {
        if hop >= depth {
            continue;
        }

        if let Some(neighbors) = outgoing.get(&current) {
            for neighbor in neighbors {
                if result.insert(neighbor.clone()) {
                    queue.push_back((neighbor.clone(), hop + 1));
                }
            }
        }
        if let Some(neighbors) = incoming.get(&current) {
            for neighbor in neighbors {
                if result.insert(neighbor.clone()) {
                    queue.push_back((neighbor.clone(), hop + 1));
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, EdgeKind, Node, NodeColor, NodeKind};

    fn create_node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_string(),
            schema: "public".to_string(),
            table: id.to_string(),
            row_count: 0,
            kind: NodeKind::Standard,
            color: NodeColor::Blue,
            x: 0.0,
            y: 0.0,
            width: 120.0,
            height: 60.0,
            selected: false,
            highlighted: false,
            orphaned: false,
            incoming: 0,
            outgoing: 0,
            primary_keys: vec![],
            foreign_keys: vec![],
        }
    }

    fn create_edge(source: &str, target: &str) -> Edge {
        Edge {
            id: format!("fk_{}_{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            source_column: "fk".to_string(),
            target_column: "id".to_string(),
            enabled: true,
            delete_action: String::new(),
            update_action: String::new(),
            kind: EdgeKind::OneToMany,
            thickness: 1.0,
        }
    }

    /// Chain: a -> b -> c -> d, plus e -> b
    fn create_chain_graph() -> SchemaGraph {
        let mut graph = SchemaGraph::new("test");
        graph.nodes = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| create_node(id))
            .collect();
        graph.edges = vec![
            create_edge("a", "b"),
            create_edge("b", "c"),
            create_edge("c", "d"),
            create_edge("e", "b"),
        ];
        graph
    }

    #[test]
    fn test_depth_zero_is_start_only() {
        let graph = create_chain_graph();
        let result = related_tables(&graph, "b", 0);
        assert_eq!(result.len(), 1);
        assert!(result.contains("b"));
    }

    #[test]
    fn test_depth_one_includes_both_directions() {
        let graph = create_chain_graph();
        let result = related_tables(&graph, "b", 1);

        // a and e point at b, b points at c
        assert_eq!(result.len(), 4);
        assert!(result.contains("a"));
        assert!(result.contains("c"));
        assert!(result.contains("e"));
        assert!(!result.contains("d"));
    }

    #[test]
    fn test_depth_reaches_distance_d_exactly() {
        let graph = create_chain_graph();

        // d is three undirected hops from a
        assert!(!related_tables(&graph, "a", 2).contains("d"));
        assert!(related_tables(&graph, "a", 3).contains("d"));
    }

    #[test]
    fn test_increasing_depth_never_shrinks() {
        let graph = create_chain_graph();
        let mut previous = 0;
        for depth in 0..5 {
            let size = related_tables(&graph, "c", depth).len();
            assert!(size >= previous);
            previous = size;
        }
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = SchemaGraph::new("test");
        graph.nodes = ["a", "b", "c"].iter().map(|id| create_node(id)).collect();
        graph.edges = vec![
            create_edge("a", "b"),
            create_edge("b", "c"),
            create_edge("c", "a"),
        ];

        let result = related_tables(&graph, "a", 10);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_unknown_start_is_empty() {
        let graph = create_chain_graph();
        assert!(related_tables(&graph, "nope", 2).is_empty());
    }

    #[test]
    fn test_start_resolved_case_insensitively() {
        let graph = create_chain_graph();
        let result = related_tables(&graph, "B", 1);
        assert!(result.contains("b"));
        assert_eq!(result.len(), 4);
    }
}
