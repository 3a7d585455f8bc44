//! Bounded join path search over relationship metadata.
//!
//! Works directly on the relationship list rather than a built graph:
//! query building needs paths between tables whether or not a graph
//! model exists. Relationships are traversable in both directions and
//! table names compare case-insensitively.

use ahash::AHashSet;
use std::fmt;

use crate::meta::RelationshipMeta;

/// Maximum number of hops explored between two tables
pub const MAX_JOIN_DEPTH: usize = 3;

/// A table-to-table path over foreign-key relationships
#[derive(Debug, Clone)]
pub struct JoinPath {
    /// Tables in traversal order, starting at the source
    pub tables: Vec<String>,
    /// Relationships used, one per hop
    pub relationships: Vec<RelationshipMeta>,
    /// Hop count
    pub distance: usize,
}

impl JoinPath {
    /// Check if this is a single-hop path
    pub fn is_direct(&self) -> bool {
        self.distance == 1
    }

    /// Format the path for display
    pub fn display(&self) -> String {
        self.tables.join(" -> ")
    }
}

/// One equality predicate for a join clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCondition {
    pub left_table: String,
    pub left_column: String,
    pub right_table: String,
    pub right_column: String,
}

impl fmt::Display for JoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} = {}.{}",
            self.left_table, self.left_column, self.right_table, self.right_column
        )
    }
}

/// Result of asking for an automatic join between two tables
#[derive(Debug, Clone)]
pub struct JoinSuggestion {
    /// False when no direct relationship exists and the caller must
    /// build the join manually
    pub auto_generated: bool,
    pub conditions: Vec<JoinCondition>,
}

/// Find every path of at most `MAX_JOIN_DEPTH` hops connecting two
/// tables, sorted ascending by hop count.
///
/// Depth-first search with a visited set that is backtracked on return,
/// so sibling branches can pass through the same intermediate table.
/// Every path within the bound is recorded. Identical source and target
/// yield no paths.
pub fn find_join_paths(
    source: &str,
    target: &str,
    relationships: &[RelationshipMeta],
) -> Vec<JoinPath> {
    let mut paths = Vec::new();
    if source.eq_ignore_ascii_case(target) {
        return paths;
    }

    let mut visited: AHashSet<String> = AHashSet::new();
    visited.insert(source.to_ascii_lowercase());
    let mut tables = vec![source.to_string()];
    let mut used: Vec<RelationshipMeta> = Vec::new();

    search(
        source,
        target,
        relationships,
        &mut visited,
        &mut tables,
        &mut used,
        &mut paths,
    );

    paths.sort_by_key(|p| p.distance);
    paths
}

fn search(
    current: &str,
    target: &str,
    relationships: &[RelationshipMeta],
    visited: &mut AHashSet<String>,
    tables: &mut Vec<String>,
    used: &mut Vec<RelationshipMeta>,
    paths: &mut Vec<JoinPath>,
) {
    if used.len() >= MAX_JOIN_DEPTH {
        return;
    }

    for rel in relationships {
        // A relationship is traversable from either end
        let next = if rel.source_table.eq_ignore_ascii_case(current) {
            &rel.target_table
        } else if rel.target_table.eq_ignore_ascii_case(current) {
            &rel.source_table
        } else {
            continue;
        };

        if next.eq_ignore_ascii_case(target) {
            let mut path_tables = tables.clone();
            path_tables.push(next.clone());
            let mut path_rels = used.clone();
            path_rels.push(rel.clone());
            paths.push(JoinPath {
                distance: path_rels.len(),
                tables: path_tables,
                relationships: path_rels,
            });
            continue;
        }

        let key = next.to_ascii_lowercase();
        if visited.contains(&key) {
            continue;
        }

        visited.insert(key.clone());
        tables.push(next.clone());
        used.push(rel.clone());

        search(next, target, relationships, visited, tables, used, paths);

        used.pop();
        tables.pop();
        visited.remove(&key);
    }
}

/// Suggest a single-hop equality join between two tables.
///
/// The first relationship connecting them in either direction supplies
/// the column pairing. With no direct relationship the result carries
/// `auto_generated == false` and no conditions, never an error.
pub fn suggest_join(left: &str, right: &str, relationships: &[RelationshipMeta]) -> JoinSuggestion {
    for rel in relationships {
        if rel.source_table.eq_ignore_ascii_case(left)
            && rel.target_table.eq_ignore_ascii_case(right)
        {
            return JoinSuggestion {
                auto_generated: true,
                conditions: vec![JoinCondition {
                    left_table: rel.source_table.clone(),
                    left_column: rel.source_column.clone(),
                    right_table: rel.target_table.clone(),
                    right_column: rel.target_column.clone(),
                }],
            };
        }
        if rel.target_table.eq_ignore_ascii_case(left)
            && rel.source_table.eq_ignore_ascii_case(right)
        {
            return JoinSuggestion {
                auto_generated: true,
                conditions: vec![JoinCondition {
                    left_table: rel.target_table.clone(),
                    left_column: rel.target_column.clone(),
                    right_table: rel.source_table.clone(),
                    right_column: rel.source_column.clone(),
                }],
            };
        }
    }

    JoinSuggestion {
        auto_generated: false,
        conditions: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_relationship(name: &str, source: &str, target: &str) -> RelationshipMeta {
        RelationshipMeta {
            name: name.to_string(),
            source_schema: "dbo".to_string(),
            source_table: source.to_string(),
            source_column: format!("{}_id", target.to_lowercase()),
            target_schema: "dbo".to_string(),
            target_table: target.to_string(),
            target_column: "id".to_string(),
            is_enabled: true,
            delete_action: String::new(),
            update_action: String::new(),
            created: None,
        }
    }

    fn shop_relationships() -> Vec<RelationshipMeta> {
        vec![
            create_relationship("fk_orders_customers", "Orders", "Customers"),
            create_relationship("fk_items_orders", "OrderItems", "Orders"),
            create_relationship("fk_items_products", "OrderItems", "Products"),
        ]
    }

    #[test]
    fn test_direct_path() {
        let rels = shop_relationships();
        let paths = find_join_paths("Orders", "Customers", &rels);

        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_direct());
        assert_eq!(paths[0].tables, vec!["Orders", "Customers"]);
        assert_eq!(paths[0].relationships[0].name, "fk_orders_customers");
    }

    #[test]
    fn test_two_hop_path() {
        let rels = shop_relationships();
        let paths = find_join_paths("OrderItems", "Customers", &rels);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].distance, 2);
        assert_eq!(paths[0].tables, vec!["OrderItems", "Orders", "Customers"]);
        assert_eq!(paths[0].display(), "OrderItems -> Orders -> Customers");
    }

    #[test]
    fn test_reverse_traversal() {
        // Products and Orders only connect through OrderItems, which
        // references both, so one hop runs against the FK direction
        let rels = shop_relationships();
        let paths = find_join_paths("Products", "Orders", &rels);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].distance, 2);
        assert_eq!(paths[0].tables, vec!["Products", "OrderItems", "Orders"]);
    }

    #[test]
    fn test_depth_bound() {
        let rels = vec![
            create_relationship("fk1", "t1", "t2"),
            create_relationship("fk2", "t2", "t3"),
            create_relationship("fk3", "t3", "t4"),
            create_relationship("fk4", "t4", "t5"),
        ];

        let within = find_join_paths("t1", "t4", &rels);
        assert_eq!(within.len(), 1);
        assert_eq!(within[0].distance, 3);

        let beyond = find_join_paths("t1", "t5", &rels);
        assert!(beyond.is_empty());
    }

    #[test]
    fn test_paths_sorted_by_distance() {
        // The indirect route is listed before the direct one
        let rels = vec![
            create_relationship("fk_ab", "a", "b"),
            create_relationship("fk_bc", "b", "c"),
            create_relationship("fk_ac", "a", "c"),
        ];

        let paths = find_join_paths("a", "c", &rels);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].distance, 1);
        assert_eq!(paths[1].distance, 2);
    }

    #[test]
    fn test_sibling_branches_reuse_intermediate() {
        // Diamond: both b and c bridge a to d
        let rels = vec![
            create_relationship("fk_ab", "a", "b"),
            create_relationship("fk_ac", "a", "c"),
            create_relationship("fk_bd", "b", "d"),
            create_relationship("fk_cd", "c", "d"),
        ];

        let paths = find_join_paths("a", "d", &rels);
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.distance == 2));
    }

    #[test]
    fn test_cycle_terminates() {
        let rels = vec![
            create_relationship("fk_ab", "a", "b"),
            create_relationship("fk_ba", "b", "a"),
        ];

        let paths = find_join_paths("a", "z", &rels);
        assert!(paths.is_empty());
    }

    #[test]
    fn test_same_table_yields_nothing() {
        let rels = shop_relationships();
        assert!(find_join_paths("Orders", "orders", &rels).is_empty());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let rels = shop_relationships();
        let paths = find_join_paths("ORDERS", "customers", &rels);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_direct());
    }

    #[test]
    fn test_suggest_join_forward() {
        let rels = shop_relationships();
        let suggestion = suggest_join("Orders", "Customers", &rels);

        assert!(suggestion.auto_generated);
        assert_eq!(suggestion.conditions.len(), 1);
        assert_eq!(
            suggestion.conditions[0].to_string(),
            "Orders.customers_id = Customers.id"
        );
    }

    #[test]
    fn test_suggest_join_reverse_pairs_columns_correctly() {
        let rels = shop_relationships();
        let suggestion = suggest_join("Customers", "Orders", &rels);

        assert!(suggestion.auto_generated);
        assert_eq!(
            suggestion.conditions[0].to_string(),
            "Customers.id = Orders.customers_id"
        );
    }

    #[test]
    fn test_suggest_join_unrelated_tables() {
        let rels = shop_relationships();
        let suggestion = suggest_join("Products", "Customers", &rels);

        assert!(!suggestion.auto_generated);
        assert!(suggestion.conditions.is_empty());
    }
}
