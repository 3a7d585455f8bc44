//! Metadata model for schema snapshots.
//!
//! This module provides:
//! - Data models for table, column, and relationship metadata
//! - The on-disk snapshot format consumed by the loader
//! - Snapshot loading from JSON/YAML files (optionally gzipped)

mod loader;

pub use loader::load_snapshot;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column definition within a table snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Column name
    pub name: String,
    /// Declared SQL type (as reported by the metadata provider)
    #[serde(default)]
    pub data_type: String,
    /// Whether this column allows NULL values
    #[serde(default)]
    pub is_nullable: bool,
    /// Whether this column is part of the primary key
    #[serde(default)]
    pub is_primary_key: bool,
    /// Whether this column participates in a foreign key
    #[serde(default)]
    pub is_foreign_key: bool,
}

/// Table snapshot supplied by an external metadata provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMeta {
    /// Schema (namespace) the table lives in
    pub schema: String,
    /// Table name
    pub name: String,
    /// Row count at snapshot time (0 when the provider did not report one)
    #[serde(default)]
    pub row_count: u64,
    /// Column definitions in order
    #[serde(default)]
    pub columns: Vec<ColumnMeta>,
}

impl TableMeta {
    /// Graph node identifier for this table: `schema.table`
    pub fn node_id(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }

    /// Names of primary key columns, in column order
    pub fn primary_key_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Names of foreign key columns, in column order
    pub fn foreign_key_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_foreign_key)
            .map(|c| c.name.clone())
            .collect()
    }
}

/// Foreign key relationship between two tables.
///
/// The source is the referencing table (the FK holder, "many" side);
/// the target is the referenced table ("one" side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipMeta {
    /// Constraint name (unique within a database)
    pub name: String,
    /// Schema of the referencing table
    pub source_schema: String,
    /// Referencing table name
    pub source_table: String,
    /// FK column on the referencing table
    pub source_column: String,
    /// Schema of the referenced table
    pub target_schema: String,
    /// Referenced table name
    pub target_table: String,
    /// Referenced column (usually the PK)
    pub target_column: String,
    /// Whether the constraint is enabled/trusted
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    /// ON DELETE action as reported by the provider
    #[serde(default)]
    pub delete_action: String,
    /// ON UPDATE action as reported by the provider
    #[serde(default)]
    pub update_action: String,
    /// Constraint creation date, when the provider reports one
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl RelationshipMeta {
    /// Node identifier of the referencing table
    pub fn source_node_id(&self) -> String {
        format!("{}.{}", self.source_schema, self.source_table)
    }

    /// Node identifier of the referenced table
    pub fn target_node_id(&self) -> String {
        format!("{}.{}", self.target_schema, self.target_table)
    }

    /// Check if this relationship touches the given table name (either end,
    /// case-insensitive)
    pub fn touches_table(&self, table: &str) -> bool {
        self.source_table.eq_ignore_ascii_case(table)
            || self.target_table.eq_ignore_ascii_case(table)
    }
}

fn default_true() -> bool {
    true
}

/// Complete metadata snapshot for one database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    /// Source database name
    pub database: String,
    /// All tables visible to the provider
    #[serde(default)]
    pub tables: Vec<TableMeta>,
    /// All foreign key relationships between those tables
    #[serde(default)]
    pub relationships: Vec<RelationshipMeta>,
}

impl MetadataSnapshot {
    /// Find a table by name (case-insensitive), ignoring schema
    pub fn get_table(&self, name: &str) -> Option<&TableMeta> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Get the number of tables in the snapshot
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the snapshot contains no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_format() {
        let table = TableMeta {
            schema: "sales".to_string(),
            name: "orders".to_string(),
            row_count: 100,
            columns: vec![],
        };
        assert_eq!(table.node_id(), "sales.orders");
    }

    #[test]
    fn test_key_column_extraction() {
        let table = TableMeta {
            schema: "sales".to_string(),
            name: "orders".to_string(),
            row_count: 0,
            columns: vec![
                ColumnMeta {
                    name: "id".to_string(),
                    data_type: "INT".to_string(),
                    is_nullable: false,
                    is_primary_key: true,
                    is_foreign_key: false,
                },
                ColumnMeta {
                    name: "customer_id".to_string(),
                    data_type: "INT".to_string(),
                    is_nullable: true,
                    is_primary_key: false,
                    is_foreign_key: true,
                },
            ],
        };

        assert_eq!(table.primary_key_columns(), vec!["id"]);
        assert_eq!(table.foreign_key_columns(), vec!["customer_id"]);
    }

    #[test]
    fn test_snapshot_defaults() {
        let json = r#"{
            "database": "shop",
            "tables": [
                {"schema": "public", "name": "users", "columns": [{"name": "id"}]}
            ],
            "relationships": [
                {
                    "name": "fk_orders_users",
                    "source_schema": "public", "source_table": "orders", "source_column": "user_id",
                    "target_schema": "public", "target_table": "users", "target_column": "id"
                }
            ]
        }"#;

        let snapshot: MetadataSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.database, "shop");
        assert_eq!(snapshot.tables[0].row_count, 0);
        assert!(!snapshot.tables[0].columns[0].is_primary_key);
        assert!(snapshot.relationships[0].is_enabled);
        assert!(snapshot.relationships[0].created.is_none());
    }

    #[test]
    fn test_touches_table_case_insensitive() {
        let rel = RelationshipMeta {
            name: "fk".to_string(),
            source_schema: "dbo".to_string(),
            source_table: "Orders".to_string(),
            source_column: "CustomerID".to_string(),
            target_schema: "dbo".to_string(),
            target_table: "Customers".to_string(),
            target_column: "CustomerID".to_string(),
            is_enabled: true,
            delete_action: String::new(),
            update_action: String::new(),
            created: None,
        };

        assert!(rel.touches_table("orders"));
        assert!(rel.touches_table("CUSTOMERS"));
        assert!(!rel.touches_table("products"));
    }
}
