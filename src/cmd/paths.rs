use crate::graph::build_graph;
use crate::join::{find_join_paths, suggest_join, JoinPath, JoinSuggestion, MAX_JOIN_DEPTH};
use crate::meta::{load_snapshot, RelationshipMeta};
use ahash::AHashSet;
use anyhow::bail;
use schemars::JsonSchema;
use serde::Serialize;
use std::path::PathBuf;

/// Machine-readable document emitted by `paths --json`.
#[derive(Debug, Serialize, JsonSchema)]
pub struct PathsJsonOutput {
    pub from: String,
    pub to: String,
    /// Paths sorted ascending by hop count
    pub paths: Vec<JoinPathJson>,
    pub suggestion: JoinSuggestionJson,
}

/// One join path.
#[derive(Debug, Serialize, JsonSchema)]
pub struct JoinPathJson {
    /// Tables in traversal order
    pub tables: Vec<String>,
    /// Constraint names used, one per hop
    pub relationships: Vec<String>,
    pub distance: usize,
}

/// Suggested join clause between the two tables.
#[derive(Debug, Serialize, JsonSchema)]
pub struct JoinSuggestionJson {
    pub auto_generated: bool,
    /// Rendered equality predicates, e.g. `orders.customer_id = customers.id`
    pub conditions: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    snapshot: PathBuf,
    from: String,
    to: String,
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

    let Some(from_node) = graph.node(&from) else {
        bail!("table not found in snapshot: {}", from);
    };
    let Some(to_node) = graph.node(&to) else {
        bail!("table not found in snapshot: {}", to);
    };
    let from_table = from_node.table.clone();
    let to_table = to_node.table.clone();

    // The search runs on the relationship list, restricted to endpoints
    // that survived filtering.
    let keep: AHashSet<String> = graph
        .nodes
        .iter()
        .map(|n| n.id.to_ascii_lowercase())
        .collect();
    let relationships: Vec<RelationshipMeta> = meta
        .relationships
        .iter()
        .filter(|r| {
            keep.contains(&r.source_node_id().to_ascii_lowercase())
                && keep.contains(&r.target_node_id().to_ascii_lowercase())
        })
        .cloned()
        .collect();

    let found = find_join_paths(&from_table, &to_table, &relationships);
    let suggestion = suggest_join(&from_table, &to_table, &relationships);

    if json {
        let doc = build_paths_json(&from_table, &to_table, &found, &suggestion);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    if found.is_empty() {
        println!(
            "No join path between {} and {} within {} hops.",
            from_table, to_table, MAX_JOIN_DEPTH
        );
    } else {
        println!(
            "Join paths from {} to {} ({}):",
            from_table,
            to_table,
            found.len()
        );
        for (i, path) in found.iter().enumerate() {
            let unit = if path.is_direct() { "hop" } else { "hops" };
            println!("  {}. {} [{} {}]", i + 1, path.display(), path.distance, unit);
        }
    }

    if suggestion.auto_generated {
        println!("\nSuggested join:");
        for condition in &suggestion.conditions {
            println!("  ON {}", condition);
        }
    } else {
        println!("\nNo direct relationship; the join has to be written manually.");
    }

    Ok(())
}

fn build_paths_json(
    from: &str,
    to: &str,
    paths: &[JoinPath],
    suggestion: &JoinSuggestion,
) -> PathsJsonOutput {
    PathsJsonOutput {
        from: from.to_string(),
        to: to.to_string(),
        paths: paths
            .iter()
            .map(|p| JoinPathJson {
                tables: p.tables.clone(),
                relationships: p.relationships.iter().map(|r| r.name.clone()).collect(),
                distance: p.distance,
            })
            .collect(),
        suggestion: JoinSuggestionJson {
            auto_generated: suggestion.auto_generated,
            conditions: suggestion
                .conditions
                .iter()
                .map(|c| c.to_string())
                .collect(),
        },
    }
}
