use crate::export::{to_dot, to_json, to_mermaid, OutputFormat};
use crate::graph::build_graph;
use crate::layout::{apply_layout, LayoutAlgorithm, LayoutOptions};
use crate::meta::load_snapshot;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[allow(clippy::too_many_arguments)]
pub fn run(
    snapshot: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    algorithm: Option<String>,
    node_spacing: f64,
    layer_spacing: f64,
    seed: u64,
    schemas: Option<String>,
    exclude_schemas: Option<String>,
    tables: Option<String>,
    orphans_only: bool,
    min_rows: Option<u64>,
    max_rows: Option<u64>,
) -> anyhow::Result<()> {
    let format = if let Some(ref f) = format {
        f.parse().map_err(|e| anyhow::anyhow!("{}", e))?
    } else if let Some(ref out) = output {
        // Detect from output extension
        out.extension()
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or(OutputFormat::Dot)
    } else {
        OutputFormat::Dot
    };

    // An unrecognized algorithm name falls back to hierarchical so the
    // command always produces coordinates.
    let algorithm = match algorithm {
        Some(a) => a.parse().unwrap_or_else(|err: String| {
            eprintln!("{err}, using hierarchical");
            LayoutAlgorithm::Hierarchical
        }),
        None => LayoutAlgorithm::default(),
    };

    if !matches!(format, OutputFormat::Json) {
        eprintln!(
            "Generating layout: {} [algorithm: {}]",
            snapshot.display(),
            algorithm
        );
    }

    let meta = load_snapshot(&snapshot)?;
    let graph = build_graph(&meta.database, &meta.tables, &meta.relationships);
    let mut graph = super::apply_filters(
        graph,
        schemas,
        exclude_schemas,
        tables,
        orphans_only,
        min_rows,
        max_rows,
    );

    if graph.is_empty() {
        if !matches!(format, OutputFormat::Json) {
            eprintln!("No tables found in snapshot.");
        }
        return Ok(());
    }

    let options = LayoutOptions {
        algorithm,
        node_spacing,
        layer_spacing,
        seed,
        ..Default::default()
    };
    apply_layout(&mut graph, &options);

    let output_content = match format {
        OutputFormat::Dot => to_dot(&graph),
        OutputFormat::Json => to_json(&graph),
        OutputFormat::Mermaid => to_mermaid(&graph),
    };

    if let Some(ref out_path) = output {
        let mut file = File::create(out_path)?;
        file.write_all(output_content.as_bytes())?;
        eprintln!("Layout written to: {}", out_path.display());
    } else {
        println!("{}", output_content);
    }

    if !matches!(format, OutputFormat::Json) {
        eprintln!(
            "\nGraph: {} tables, {} relationships, {} cycles",
            graph.stats.table_count, graph.stats.relationship_count, graph.stats.cycle_count
        );
    }

    Ok(())
}
