//! Integration tests that verify JSON output matches JSON schemas.
//!
//! Each command that supports machine-readable output is tested against
//! the schema the binary itself publishes via the `schema` subcommand.

use jsonschema::Validator;
use serde_json::Value;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn schema_graph_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schema-graph"))
}

fn create_temp_snapshot(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn load_schema(name: &str) -> Validator {
    let output = schema_graph_bin()
        .arg("schema")
        .arg(name)
        .output()
        .expect("Failed to execute schema command");
    assert!(
        output.status.success(),
        "schema {} failed: {}",
        name,
        String::from_utf8_lossy(&output.stderr)
    );

    let schema: Value = serde_json::from_slice(&output.stdout).expect("Invalid schema JSON");
    Validator::new(&schema).expect("Failed to compile schema")
}

fn validate_json_output(output: &std::process::Output, schema_name: &str) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "Command failed with stderr: {}",
        stderr
    );

    let json: Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {}\nOutput: {}", e, stdout));

    let schema = load_schema(schema_name);
    let result = schema.validate(&json);

    if let Err(error) = result {
        panic!(
            "JSON output doesn't match {} schema:\n  - {}: {}\n\nOutput was:\n{}",
            schema_name,
            error.instance_path(),
            error,
            serde_json::to_string_pretty(&json).unwrap()
        );
    }
}

fn shop_snapshot() -> &'static str {
    r#"{
  "database": "shop",
  "tables": [
    {"schema": "public", "name": "users", "row_count": 5000},
    {"schema": "public", "name": "orders", "row_count": 12000},
    {"schema": "public", "name": "order_items", "row_count": 50000},
    {"schema": "public", "name": "statuses", "row_count": 8},
    {"schema": "archive", "name": "old_logs", "row_count": 900}
  ],
  "relationships": [
    {
      "name": "fk_orders_users",
      "source_schema": "public", "source_table": "orders", "source_column": "user_id",
      "target_schema": "public", "target_table": "users", "target_column": "id"
    },
    {
      "name": "fk_order_items_orders",
      "source_schema": "public", "source_table": "order_items", "source_column": "order_id",
      "target_schema": "public", "target_table": "orders", "target_column": "id"
    },
    {
      "name": "fk_orders_statuses",
      "source_schema": "public", "source_table": "orders", "source_column": "status_id",
      "target_schema": "public", "target_table": "statuses", "target_column": "id"
    }
  ]
}"#
}

// =============================================================================
// Analyze Command
// =============================================================================

#[test]
fn test_analyze_json_matches_schema() {
    let file = create_temp_snapshot(shop_snapshot());

    let output = schema_graph_bin()
        .arg("analyze")
        .arg(file.path())
        .arg("--json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "analyze");
}

#[test]
fn test_analyze_empty_snapshot_matches_schema() {
    let file =
        create_temp_snapshot(r#"{"database": "empty", "tables": [], "relationships": []}"#);

    let output = schema_graph_bin()
        .arg("analyze")
        .arg(file.path())
        .arg("--json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "analyze");
}

#[test]
fn test_analyze_filtered_json_matches_schema() {
    let file = create_temp_snapshot(shop_snapshot());

    let output = schema_graph_bin()
        .arg("analyze")
        .arg(file.path())
        .arg("--schemas")
        .arg("public")
        .arg("--min-rows")
        .arg("1000")
        .arg("--json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "analyze");
}

// =============================================================================
// Layout Command
// =============================================================================

#[test]
fn test_layout_json_matches_schema() {
    let file = create_temp_snapshot(shop_snapshot());

    let output = schema_graph_bin()
        .arg("layout")
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "layout");
}

#[test]
fn test_layout_force_json_matches_schema() {
    let file = create_temp_snapshot(shop_snapshot());

    let output = schema_graph_bin()
        .arg("layout")
        .arg(file.path())
        .arg("--algorithm")
        .arg("force")
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "layout");
}

// =============================================================================
// Related Command
// =============================================================================

#[test]
fn test_related_json_matches_schema() {
    let file = create_temp_snapshot(shop_snapshot());

    let output = schema_graph_bin()
        .arg("related")
        .arg(file.path())
        .arg("--table")
        .arg("orders")
        .arg("--depth")
        .arg("2")
        .arg("--json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "related");
}

// =============================================================================
// Paths Command
// =============================================================================

#[test]
fn test_paths_json_matches_schema() {
    let file = create_temp_snapshot(shop_snapshot());

    let output = schema_graph_bin()
        .arg("paths")
        .arg(file.path())
        .arg("--from")
        .arg("order_items")
        .arg("--to")
        .arg("users")
        .arg("--json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "paths");
}

#[test]
fn test_paths_unreachable_json_matches_schema() {
    let file = create_temp_snapshot(shop_snapshot());

    let output = schema_graph_bin()
        .arg("paths")
        .arg(file.path())
        .arg("--from")
        .arg("users")
        .arg("--to")
        .arg("old_logs")
        .arg("--json")
        .output()
        .expect("Failed to execute command");

    validate_json_output(&output, "paths");
}

// =============================================================================
// Published Schemas
// =============================================================================

/// Every published schema compiles as a valid JSON Schema
#[test]
fn test_all_published_schemas_compile() {
    for name in ["analyze", "layout", "paths", "related"] {
        load_schema(name);
    }
}

/// The no-argument form lists every schema under its command name
#[test]
fn test_schema_listing_covers_every_command() {
    let output = schema_graph_bin()
        .arg("schema")
        .output()
        .expect("Failed to execute schema command");

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON");
    let object = json.as_object().expect("Expected a JSON object");

    for name in ["analyze", "layout", "paths", "related"] {
        let schema = object
            .get(name)
            .unwrap_or_else(|| panic!("{} missing from schema listing", name));
        Validator::new(schema)
            .unwrap_or_else(|e| panic!("{} is not a valid JSON Schema: {}", name, e));
    }
}

#[test]
fn test_unknown_schema_name_fails() {
    let output = schema_graph_bin()
        .arg("schema")
        .arg("nonexistent")
        .output()
        .expect("Failed to execute schema command");

    assert!(!output.status.success());
}
