//! JSON Schema generation for CLI output types.
//!
//! This module provides schema generation for all commands that support --json output.
//! Schemas are generated using the schemars crate and can be exported via the `schema` subcommand.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Returns all JSON schemas for commands that support --json output.
/// Uses BTreeMap for deterministic ordering (important for diffable output).
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    let mut schemas = BTreeMap::new();

    // analyze command
    schemas.insert(
        "analyze",
        schema_for!(crate::cmd::analyze::AnalyzeJsonOutput),
    );

    // layout command (uses GraphJson from the export module)
    schemas.insert("layout", schema_for!(crate::export::GraphJson));

    // paths command
    schemas.insert("paths", schema_for!(crate::cmd::paths::PathsJsonOutput));

    // related command
    schemas.insert(
        "related",
        schema_for!(crate::cmd::related::RelatedJsonOutput),
    );

    schemas
}

/// Generate a single schema by command name.
pub fn get_schema(command: &str) -> Option<Schema> {
    all_schemas().remove(command)
}

/// List all available schema names.
pub fn schema_names() -> Vec<&'static str> {
    all_schemas().keys().copied().collect()
}
