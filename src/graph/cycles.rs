//! Cycle detection over directed foreign-key edges.

use ahash::{AHashMap, AHashSet};

use super::SchemaGraph;

/// A circular reference chain (list of node ids forming the cycle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub tables: Vec<String>,
}

impl Cycle {
    /// Check if this is a self-referencing cycle (single table)
    pub fn is_self_reference(&self) -> bool {
        self.tables.len() == 1
    }

    /// Format the cycle for display
    pub fn display(&self) -> String {
        if self.is_self_reference() {
            format!("{} -> {} (self-reference)", self.tables[0], self.tables[0])
        } else {
            let mut parts = self.tables.clone();
            parts.push(self.tables[0].clone()); // Complete the cycle
            parts.join(" -> ")
        }
    }
}

/// Find circular reference chains by depth-first search over outgoing
/// edges.
///
/// An edge into a node already on the recursion stack records the active
/// path from that node's first occurrence as a cycle. A node stops
/// exploring its remaining neighbors once any downstream call reports a
/// cycle, so each DFS root contributes at most one cycle.
pub fn find_cycles(graph: &SchemaGraph) -> Vec<Cycle> {
    let (outgoing, _) = graph.adjacency_maps();

    let mut visited: AHashSet<String> = AHashSet::new();
    let mut on_stack: AHashSet<String> = AHashSet::new();
    let mut path: Vec<String> = Vec::new();
    let mut cycles: Vec<Cycle> = Vec::new();

    for node in &graph.nodes {
        if !visited.contains(&node.id) {
            visit(
                &node.id,
                &outgoing,
                &mut visited,
                &mut on_stack,
                &mut path,
                &mut cycles,
            );
        }
    }

    cycles
}

fn visit(
    node: &str,
    outgoing: &AHashMap<String, Vec<String>>,
    visited: &mut AHashSet<String>,
    on_stack: &mut AHashSet<String>,
    path: &mut Vec<String>,
    cycles: &mut Vec<Cycle>,
) -> bool {
    visited.insert(node.to_string());
    on_stack.insert(node.to_string());
    path.push(node.to_string());

    let mut found = false;
    if let Some(neighbors) = outgoing.get(node) {
        for next in neighbors {
            if on_stack.contains(next) {
                // Back-edge: the active path from `next` onward is a cycle.
                // `next` is on the stack, so it must be in the path.
                let start = path.iter().position(|id| id == next).unwrap();
                cycles.push(Cycle {
                    tables: path[start..].to_vec(),
                });
                found = true;
            } else if !visited.contains(next)
                && visit(next, outgoing, visited, on_stack, path, cycles)
            {
                found = true;
            }
            if found {
                break;
            }
        }
    }

    path.pop();
    on_stack.remove(node);
    found
}
