use crate::export::StatsJson;
use crate::graph::{build_graph, find_cycles, NodeKind, SchemaGraph};
use crate::meta::load_snapshot;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

/// Machine-readable document emitted by `analyze --json`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct AnalyzeJsonOutput {
    /// Database name from the snapshot
    pub database: String,
    /// Analysis timestamp, RFC 3339
    pub generated_at: String,
    pub stats: StatsJson,
    /// Table counts per classification
    pub classification: BTreeMap<String, usize>,
    /// Per-table summaries, sorted by id
    pub tables: Vec<TableSummaryJson>,
    /// Rendered cycle descriptions
    pub cycles: Vec<String>,
}

/// One table row in the analyze output.
#[derive(Debug, Serialize, JsonSchema)]
pub struct TableSummaryJson {
    pub id: String,
    pub kind: String,
    pub row_count: u64,
    pub incoming: usize,
    pub outgoing: usize,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    snapshot: PathBuf,
    schemas: Option<String>,
    exclude_schemas: Option<String>,
    tables: Option<String>,
    orphans_only: bool,
    min_rows: Option<u64>,
    max_rows: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    if !json {
        eprintln!("Analyzing snapshot: {}", snapshot.display());
    }

    let start_time = Instant::now();

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

    let elapsed = start_time.elapsed();

    if json {
        let doc = build_analyze_json(&graph);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    eprintln!("✓ Analysis completed in {:.3?}\n", elapsed);

    if graph.is_empty() {
        println!("No tables found in snapshot.");
        return Ok(());
    }

    println!("Found {} tables:\n", graph.node_count());
    println!(
        "{:<40} {:>10} {:>6} {:>6} {:>12}",
        "Table", "Kind", "In", "Out", "Rows"
    );
    println!("{}", "─".repeat(80));

    let mut rows: Vec<_> = graph.nodes.iter().collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));

    let mut total_rows: u64 = 0;
    for node in &rows {
        let name = truncate_string(&node.id, 40);
        println!(
            "{:<40} {:>10} {:>6} {:>6} {:>12}",
            name,
            node.kind.as_str(),
            node.incoming,
            node.outgoing,
            node.row_count
        );
        total_rows += node.row_count;
    }

    println!("{}", "─".repeat(80));
    println!(
        "{:<40} {:>10} {:>6} {:>6} {:>12}",
        "TOTAL", "-", "-", "-", total_rows
    );

    println!("\nClassification:");
    for kind in [
        NodeKind::Primary,
        NodeKind::Standard,
        NodeKind::Lookup,
        NodeKind::Junction,
        NodeKind::Orphaned,
    ] {
        let count = graph.nodes.iter().filter(|n| n.kind == kind).count();
        if count > 0 {
            println!("  {:<10} {}", kind.as_str(), count);
        }
    }

    let cycles = find_cycles(&graph);
    if cycles.is_empty() {
        println!("\nNo circular dependencies detected.");
    } else {
        println!("\nCircular dependencies ({}):", cycles.len());
        for (i, cycle) in cycles.iter().enumerate() {
            println!("  {}. {}", i + 1, cycle.display());
        }
    }

    println!(
        "\nGraph: {} tables, {} relationships, {} orphans, {} disabled",
        graph.stats.table_count,
        graph.stats.relationship_count,
        graph.stats.orphan_count,
        graph.stats.disabled_count
    );

    Ok(())
}

fn build_analyze_json(graph: &SchemaGraph) -> AnalyzeJsonOutput {
    let mut classification: BTreeMap<String, usize> = BTreeMap::new();
    for node in &graph.nodes {
        *classification
            .entry(node.kind.as_str().to_string())
            .or_insert(0) += 1;
    }

    let mut tables: Vec<TableSummaryJson> = graph
        .nodes
        .iter()
        .map(|n| TableSummaryJson {
            id: n.id.clone(),
            kind: n.kind.as_str().to_string(),
            row_count: n.row_count,
            incoming: n.incoming,
            outgoing: n.outgoing,
        })
        .collect();
    tables.sort_by(|a, b| a.id.cmp(&b.id));

    let cycles = find_cycles(graph).iter().map(|c| c.display()).collect();

    AnalyzeJsonOutput {
        database: graph.database.clone(),
        generated_at: graph.generated_at.to_rfc3339(),
        stats: StatsJson {
            table_count: graph.stats.table_count,
            relationship_count: graph.stats.relationship_count,
            orphan_count: graph.stats.orphan_count,
            disabled_count: graph.stats.disabled_count,
            cycle_count: graph.stats.cycle_count,
        },
        classification,
        tables,
        cycles,
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
