//! Name pools and random value helpers for deterministic fake metadata.

use chrono::{DateTime, TimeZone, Utc};
use rand::{Rng, RngExt};

/// Schema names
const SCHEMA_NAMES: &[&str] = &[
    "public",
    "sales",
    "billing",
    "inventory",
    "hr",
    "crm",
    "audit",
    "analytics",
    "support",
    "auth",
];

/// Table base names
const TABLE_NOUNS: &[&str] = &[
    "users",
    "orders",
    "products",
    "invoices",
    "payments",
    "shipments",
    "tickets",
    "accounts",
    "sessions",
    "events",
    "documents",
    "messages",
    "teams",
    "projects",
    "tasks",
    "assets",
    "vendors",
    "contracts",
    "subscriptions",
    "plans",
    "warehouses",
    "returns",
    "reviews",
    "addresses",
];

/// Lookup table names (small reference tables)
const LOOKUP_NOUNS: &[&str] = &[
    "statuses",
    "countries",
    "currencies",
    "roles",
    "priorities",
    "units",
    "timezones",
    "languages",
];

/// Self-referencing table names (parent_id hierarchies)
const TREE_NOUNS: &[&str] = &["categories", "folders", "departments", "threads"];

/// Referential actions for generated constraints
const DELETE_ACTIONS: &[&str] = &["CASCADE", "NO ACTION", "SET NULL", ""];

/// Fake data generator with deterministic RNG
pub struct FakeData<R: Rng> {
    rng: R,
}

impl<R: Rng> FakeData<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Schema name for a global index, suffixed once the pool runs out
    pub fn schema_name(index: usize) -> String {
        pooled_name(SCHEMA_NAMES, index)
    }

    /// Table name for a global index, unique across the whole snapshot
    pub fn table_name(index: usize) -> String {
        pooled_name(TABLE_NOUNS, index)
    }

    /// Lookup table name for a global index
    pub fn lookup_name(index: usize) -> String {
        pooled_name(LOOKUP_NOUNS, index)
    }

    /// Self-referencing table name for a global index
    pub fn tree_name(index: usize) -> String {
        pooled_name(TREE_NOUNS, index)
    }

    /// Generate a row count in an inclusive range
    pub fn row_count(&mut self, min: u64, max: u64) -> u64 {
        self.rng.random_range(min..=max)
    }

    /// Generate a boolean with given probability of true
    pub fn bool_with_probability(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    /// Generate a referential delete action
    pub fn delete_action(&mut self) -> &'static str {
        DELETE_ACTIONS[self.rng.random_range(0..DELETE_ACTIONS.len())]
    }

    /// Generate a constraint creation timestamp
    pub fn created_at(&mut self, year_start: i32, year_end: i32) -> DateTime<Utc> {
        let year = self.rng.random_range(year_start..=year_end);
        let month = self.rng.random_range(1..=12);
        let day = self.rng.random_range(1..=28); // Safe for all months
        let hour = self.rng.random_range(0..24);
        let minute = self.rng.random_range(0..60);
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Pool lookup with a numeric suffix once the pool is exhausted. The
/// (base, suffix) pair is unique per index, so generated names never
/// collide.
fn pooled_name(pool: &[&str], index: usize) -> String {
    let base = pool[index % pool.len()];
    if index < pool.len() {
        base.to_string()
    } else {
        format!("{}_{}", base, index / pool.len() + 1)
    }
}

/// Singular form of a table noun
pub fn singular(noun: &str) -> String {
    if let Some(stem) = noun.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = noun.strip_suffix("ses") {
        format!("{}s", stem)
    } else {
        noun.trim_end_matches('s').to_string()
    }
}

/// FK column name referencing a table, e.g. `user_id` for `users`
pub fn fk_column(target: &str) -> String {
    format!("{}_id", singular(target))
}
