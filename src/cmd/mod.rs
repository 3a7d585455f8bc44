pub mod analyze;
pub mod layout;
pub mod paths;
pub mod related;

use crate::graph::{GraphFilter, SchemaGraph};
use ahash::AHashSet;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use glob::Pattern;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schema-graph")]
#[command(author = "Helge Sverre <helge.sverre@gmail.com>")]
#[command(version)]
#[command(about = "Analyze, filter, and lay out database schema relationship graphs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a schema snapshot and display graph statistics
    Analyze {
        /// Snapshot file, JSON or YAML (.gz supported)
        snapshot: PathBuf,

        /// Only include these schemas (comma-separated)
        #[arg(long)]
        schemas: Option<String>,

        /// Exclude these schemas (comma-separated)
        #[arg(long)]
        exclude_schemas: Option<String>,

        /// Only include matching tables (comma-separated glob patterns)
        #[arg(short, long)]
        tables: Option<String>,

        /// Keep only tables with no relationships at all
        #[arg(long)]
        orphans_only: bool,

        /// Minimum row count
        #[arg(long)]
        min_rows: Option<u64>,

        /// Maximum row count
        #[arg(long)]
        max_rows: Option<u64>,

        /// Output results as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Lay out a schema graph and export it as DOT, JSON, or Mermaid
    Layout {
        /// Snapshot file, JSON or YAML (.gz supported)
        snapshot: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: dot, json, mermaid (auto-detected from output extension)
        #[arg(short, long)]
        format: Option<String>,

        /// Layout algorithm: hierarchical, circular, force, grid
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Horizontal spacing between neighboring nodes
        #[arg(long, default_value = "50")]
        node_spacing: f64,

        /// Vertical spacing between layers
        #[arg(long, default_value = "150")]
        layer_spacing: f64,

        /// Random seed for the force-directed layout
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Only include these schemas (comma-separated)
        #[arg(long)]
        schemas: Option<String>,

        /// Exclude these schemas (comma-separated)
        #[arg(long)]
        exclude_schemas: Option<String>,

        /// Only include matching tables (comma-separated glob patterns)
        #[arg(short, long)]
        tables: Option<String>,

        /// Keep only tables with no relationships at all
        #[arg(long)]
        orphans_only: bool,

        /// Minimum row count
        #[arg(long)]
        min_rows: Option<u64>,

        /// Maximum row count
        #[arg(long)]
        max_rows: Option<u64>,
    },

    /// List every table within N relationship hops of a starting table
    Related {
        /// Snapshot file, JSON or YAML (.gz supported)
        snapshot: PathBuf,

        /// Starting table (node id or bare table name)
        #[arg(long)]
        table: String,

        /// Maximum number of hops
        #[arg(short, long, default_value = "1")]
        depth: usize,

        /// Only include these schemas (comma-separated)
        #[arg(long)]
        schemas: Option<String>,

        /// Exclude these schemas (comma-separated)
        #[arg(long)]
        exclude_schemas: Option<String>,

        /// Only include matching tables (comma-separated glob patterns)
        #[arg(long)]
        tables: Option<String>,

        /// Keep only tables with no relationships at all
        #[arg(long)]
        orphans_only: bool,

        /// Minimum row count
        #[arg(long)]
        min_rows: Option<u64>,

        /// Maximum row count
        #[arg(long)]
        max_rows: Option<u64>,

        /// Output results as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Find join paths between two tables over foreign-key relationships
    Paths {
        /// Snapshot file, JSON or YAML (.gz supported)
        snapshot: PathBuf,

        /// Source table (node id or bare table name)
        #[arg(long)]
        from: String,

        /// Target table (node id or bare table name)
        #[arg(long)]
        to: String,

        /// Only include these schemas (comma-separated)
        #[arg(long)]
        schemas: Option<String>,

        /// Exclude these schemas (comma-separated)
        #[arg(long)]
        exclude_schemas: Option<String>,

        /// Only include matching tables (comma-separated glob patterns)
        #[arg(long)]
        tables: Option<String>,

        /// Keep only tables with no relationships at all
        #[arg(long)]
        orphans_only: bool,

        /// Minimum row count
        #[arg(long)]
        min_rows: Option<u64>,

        /// Maximum row count
        #[arg(long)]
        max_rows: Option<u64>,

        /// Output results as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON Schema for a machine-readable output format
    Schema {
        /// Schema name: analyze, layout, paths, related (prints all when omitted)
        name: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Analyze {
            snapshot,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
            json,
        } => analyze::run(
            snapshot,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
            json,
        ),
        Commands::Layout {
            snapshot,
            output,
            format,
            algorithm,
            node_spacing,
            layer_spacing,
            seed,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
        } => layout::run(
            snapshot,
            output,
            format,
            algorithm,
            node_spacing,
            layer_spacing,
            seed,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
        ),
        Commands::Related {
            snapshot,
            table,
            depth,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
            json,
        } => related::run(
            snapshot,
            table,
            depth,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
            json,
        ),
        Commands::Paths {
            snapshot,
            from,
            to,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
            json,
        } => paths::run(
            snapshot,
            from,
            to,
            schemas,
            exclude_schemas,
            tables,
            orphans_only,
            min_rows,
            max_rows,
            json,
        ),
        Commands::Schema { name } => run_schema(name),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "schema-graph",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

fn run_schema(name: Option<String>) -> anyhow::Result<()> {
    match name {
        Some(name) => {
            let Some(schema) = crate::json_schema::get_schema(&name) else {
                anyhow::bail!(
                    "unknown schema: {}. Valid options: {}",
                    name,
                    crate::json_schema::schema_names().join(", ")
                );
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        None => {
            let schemas = crate::json_schema::all_schemas();
            println!("{}", serde_json::to_string_pretty(&schemas)?);
        }
    }
    Ok(())
}

/// Apply the shared filter flags to a freshly built graph, re-deriving
/// degrees, classifications, and statistics when anything was filtered.
#[allow(clippy::too_many_arguments)]
pub(crate) fn apply_filters(
    graph: SchemaGraph,
    schemas: Option<String>,
    exclude_schemas: Option<String>,
    tables: Option<String>,
    orphans_only: bool,
    min_rows: Option<u64>,
    max_rows: Option<u64>,
) -> SchemaGraph {
    let filter = build_filter(
        &graph,
        schemas,
        exclude_schemas,
        tables,
        orphans_only,
        min_rows,
        max_rows,
    );
    if !filter.is_active() {
        return graph;
    }

    let mut filtered = filter.apply(&graph);
    filtered.recompute_statistics();
    filtered
}

/// Build a filter from the shared CLI flags. Table specs are glob
/// patterns matched case-insensitively against node ids and bare table
/// names, expanded here to the explicit id set the filter works on.
#[allow(clippy::too_many_arguments)]
fn build_filter(
    graph: &SchemaGraph,
    schemas: Option<String>,
    exclude_schemas: Option<String>,
    tables: Option<String>,
    orphans_only: bool,
    min_rows: Option<u64>,
    max_rows: Option<u64>,
) -> GraphFilter {
    let mut filter = GraphFilter {
        orphans_only,
        min_rows: min_rows.unwrap_or(0),
        max_rows: max_rows.unwrap_or(u64::MAX),
        ..Default::default()
    };

    if let Some(ref list) = schemas {
        filter.schemas = split_list(list);
    }
    if let Some(ref list) = exclude_schemas {
        filter.exclude_schemas = split_list(list);
    }
    if let Some(spec) = tables {
        let patterns: Vec<Pattern> = spec
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|t| Pattern::new(&t.to_ascii_lowercase()).ok())
            .collect();

        for node in &graph.nodes {
            if patterns.iter().any(|p| {
                p.matches(&node.id.to_ascii_lowercase())
                    || p.matches(&node.table.to_ascii_lowercase())
            }) {
                filter.tables.insert(node.id.clone());
            }
        }

        // A spec that matched nothing still has to keep the filter
        // active rather than fall through to selecting every table.
        if filter.tables.is_empty() {
            filter.tables.insert(spec);
        }
    }

    filter
}

fn split_list(list: &str) -> AHashSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
