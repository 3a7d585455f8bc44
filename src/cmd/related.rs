use crate::graph::{build_graph, related_tables};
use crate::meta::load_snapshot;
use anyhow::bail;
use schemars::JsonSchema;
use serde::Serialize;
use std::path::PathBuf;

/// Machine-readable document emitted by `related --json`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct RelatedJsonOutput {
    /// Canonical id of the starting table
    pub table: String,
    pub depth: usize,
    /// Sorted ids of every table within `depth` hops, start included
    pub related: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    snapshot: PathBuf,
    table: String,
    depth: usize,
    schemas: Option<String>,
    exclude_schemas: Option<String>,
    tables: Option<String>,
    orphans_only: bool,
    min_rows: Option<u64>,
    max_rows: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let meta = load_snapshot(&snapshot)?;
    let graph = build_graph(&meta.database, &meta.tables, &meta.relationships);
    let graph = super::apply_filters(
        graph,
        schemas,
        exclude_schemas,
        tables,
        orphans_only,
        min_rows,
        max_rows,
    );

    let Some(start) = graph.node(&table) else {
        bail!("table not found in snapshot: {}", table);
    };
    let start_id = start.id.clone();

    let mut related: Vec<String> = related_tables(&graph, &start_id, depth)
        .into_iter()
        .collect();
    related.sort();

    if json {
        let doc = RelatedJsonOutput {
            table: start_id,
            depth,
            related,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!(
        "Tables within {} hop(s) of {} ({}):",
        depth,
        start_id,
        related.len()
    );
    for id in &related {
        println!("  {}", id);
    }

    Ok(())
}
