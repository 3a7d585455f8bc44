//! Snapshot generator producing a known mix of table classifications.
//!
//! Every schema gets one hub table referenced by its satellites and a
//! junction (keeping the hub above the primary threshold), one lookup,
//! one self-referencing table, and one orphan. Table names are unique
//! across the whole snapshot.

use crate::fake::{fk_column, singular, FakeData};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schema_graph::meta::{ColumnMeta, MetadataSnapshot, RelationshipMeta, TableMeta};

/// Generation scale presets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// 2 schemas, 16 tables
    Small,
    /// 6 schemas, 120 tables
    Medium,
    /// 20 schemas, 600 tables
    Large,
    /// 60 schemas, 2,400 tables (for layout stress testing)
    XLarge,
}

impl Scale {
    pub fn schemas(&self) -> usize {
        match self {
            Scale::Small => 2,
            Scale::Medium => 6,
            Scale::Large => 20,
            Scale::XLarge => 60,
        }
    }

    /// At least eight, so each schema keeps a hub with more than three
    /// incoming relationships alongside the other roles.
    pub fn tables_per_schema(&self) -> usize {
        match self {
            Scale::Small => 8,
            Scale::Medium => 20,
            Scale::Large => 30,
            Scale::XLarge => 40,
        }
    }

    pub fn table_count(&self) -> usize {
        self.schemas() * self.tables_per_schema()
    }
}

impl std::str::FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "s" => Ok(Scale::Small),
            "medium" | "m" => Ok(Scale::Medium),
            "large" | "l" => Ok(Scale::Large),
            "xlarge" | "xl" | "x" => Ok(Scale::XLarge),
            _ => Err(format!(
                "Unknown scale: {}. Use small, medium, large, or xlarge",
                s
            )),
        }
    }
}

/// Main snapshot generator
pub struct Generator {
    scale: Scale,
    fake: FakeData<ChaCha8Rng>,
}

impl Generator {
    pub fn new(seed: u64, scale: Scale) -> Self {
        Self {
            scale,
            fake: FakeData::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Generate the full snapshot
    pub fn generate(&mut self) -> MetadataSnapshot {
        let mut tables = Vec::new();
        let mut relationships = Vec::new();

        for schema_index in 0..self.scale.schemas() {
            self.generate_schema(schema_index, &mut tables, &mut relationships);
        }

        MetadataSnapshot {
            database: "generated".to_string(),
            tables,
            relationships,
        }
    }

    fn generate_schema(
        &mut self,
        schema_index: usize,
        tables: &mut Vec<TableMeta>,
        relationships: &mut Vec<RelationshipMeta>,
    ) {
        let schema = FakeData::<ChaCha8Rng>::schema_name(schema_index);
        let start_index = schema_index * self.scale.tables_per_schema();
        let satellite_count = self.scale.tables_per_schema() - 5;

        let hub = FakeData::<ChaCha8Rng>::table_name(start_index);
        let satellites: Vec<String> = (1..=satellite_count)
            .map(|i| FakeData::<ChaCha8Rng>::table_name(start_index + i))
            .collect();
        let lookup = FakeData::<ChaCha8Rng>::lookup_name(schema_index);
        let junction = format!("{}_{}", singular(&hub), satellites[0]);
        let tree = FakeData::<ChaCha8Rng>::tree_name(schema_index);
        let orphan = format!("{}_archive", hub);

        // Hub: referenced by every satellite and the junction
        let hub_rows = self.fake.row_count(10_000, 1_000_000);
        tables.push(self.table(&schema, &hub, hub_rows, &[fk_column(&lookup)]));
        relationships.push(self.relationship(&schema, &hub, &fk_column(&lookup), &lookup));

        for satellite in &satellites {
            let rows = self.fake.row_count(100, 50_000);
            tables.push(self.table(&schema, satellite, rows, &[fk_column(&hub)]));
            relationships.push(self.relationship(&schema, satellite, &fk_column(&hub), &hub));
        }

        let lookup_rows = self.fake.row_count(5, 99);
        tables.push(self.table(&schema, &lookup, lookup_rows, &[]));

        let junction_rows = self.fake.row_count(100, 10_000);
        tables.push(self.table(
            &schema,
            &junction,
            junction_rows,
            &[fk_column(&hub), fk_column(&satellites[0])],
        ));
        relationships.push(self.relationship(&schema, &junction, &fk_column(&hub), &hub));
        relationships.push(self.relationship(
            &schema,
            &junction,
            &fk_column(&satellites[0]),
            &satellites[0],
        ));

        let tree_rows = self.fake.row_count(100, 5_000);
        tables.push(self.table(&schema, &tree, tree_rows, &["parent_id".to_string()]));
        relationships.push(self.relationship(&schema, &tree, "parent_id", &tree));

        let orphan_rows = self.fake.row_count(10, 100_000);
        tables.push(self.table(&schema, &orphan, orphan_rows, &[]));
    }

    fn table(&mut self, schema: &str, name: &str, row_count: u64, fk_columns: &[String]) -> TableMeta {
        let mut columns = vec![ColumnMeta {
            name: "id".to_string(),
            data_type: "bigint".to_string(),
            is_nullable: false,
            is_primary_key: true,
            is_foreign_key: false,
        }];

        for fk in fk_columns {
            columns.push(ColumnMeta {
                name: fk.clone(),
                data_type: "bigint".to_string(),
                is_nullable: true,
                is_primary_key: false,
                is_foreign_key: true,
            });
        }

        columns.push(ColumnMeta {
            name: "name".to_string(),
            data_type: "varchar(255)".to_string(),
            is_nullable: false,
            is_primary_key: false,
            is_foreign_key: false,
        });
        columns.push(ColumnMeta {
            name: "created_at".to_string(),
            data_type: "timestamp".to_string(),
            is_nullable: true,
            is_primary_key: false,
            is_foreign_key: false,
        });

        TableMeta {
            schema: schema.to_string(),
            name: name.to_string(),
            row_count,
            columns,
        }
    }

    fn relationship(
        &mut self,
        schema: &str,
        source: &str,
        column: &str,
        target: &str,
    ) -> RelationshipMeta {
        RelationshipMeta {
            name: format!("fk_{}_{}", source, target),
            source_schema: schema.to_string(),
            source_table: source.to_string(),
            source_column: column.to_string(),
            target_schema: schema.to_string(),
            target_table: target.to_string(),
            target_column: "id".to_string(),
            is_enabled: self.fake.bool_with_probability(0.95),
            delete_action: self.fake.delete_action().to_string(),
            update_action: String::new(),
            created: Some(self.fake.created_at(2020, 2024)),
        }
    }
}
