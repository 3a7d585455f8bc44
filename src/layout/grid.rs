//! Row-major grid placement.

use crate::graph::SchemaGraph;

const CELL_WIDTH: f64 = 150.0;
const CELL_HEIGHT: f64 = 100.0;
const ORIGIN: f64 = 50.0;

/// Place nodes row-major in a near-square grid, in node list order
pub fn apply(graph: &mut SchemaGraph) {
    let n = graph.nodes.len();
    if n == 0 {
        return;
    }

    let columns = (n as f64).sqrt().ceil() as usize;

    for (i, node) in graph.nodes.iter_mut().enumerate() {
        let column = i % columns;
        let row = i / columns;
        node.x = ORIGIN + column as f64 * CELL_WIDTH;
        node.y = ORIGIN + row as f64 * CELL_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::meta::TableMeta;

    fn create_graph(count: usize) -> SchemaGraph {
        let tables: Vec<TableMeta> = (0..count)
            .map(|i| TableMeta {
                schema: "public".to_string(),
                name: format!("t{}", i),
                row_count: 0,
                columns: vec![],
            })
            .collect();
        build_graph("test", &tables, &[])
    }

    #[test]
    fn test_nine_nodes_make_three_columns() {
        let mut graph = create_graph(9);
        apply(&mut graph);

        // Fourth node wraps to the second row
        assert_eq!(graph.nodes[3].x, 50.0);
        assert_eq!(graph.nodes[3].y, 150.0);
        // Last node sits at (2, 2)
        assert_eq!(graph.nodes[8].x, 350.0);
        assert_eq!(graph.nodes[8].y, 250.0);
    }

    #[test]
    fn test_ten_nodes_round_up_to_four_columns() {
        let mut graph = create_graph(10);
        apply(&mut graph);

        assert_eq!(graph.nodes[4].x, 50.0);
        assert_eq!(graph.nodes[4].y, 150.0);
        assert_eq!(graph.nodes[9].x, 200.0);
        assert_eq!(graph.nodes[9].y, 250.0);
    }

    #[test]
    fn test_first_node_at_origin() {
        let mut graph = create_graph(5);
        apply(&mut graph);

        assert_eq!(graph.nodes[0].x, ORIGIN);
        assert_eq!(graph.nodes[0].y, ORIGIN);
    }

    #[test]
    fn test_distinct_cells() {
        let mut graph = create_graph(12);
        apply(&mut graph);

        let mut cells: Vec<(i64, i64)> = graph
            .nodes
            .iter()
            .map(|n| (n.x as i64, n.y as i64))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 12);
    }
}
