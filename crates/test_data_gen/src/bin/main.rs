//! CLI for generating snapshot fixtures.
//!
//! Usage:
//!   gen-fixtures --scale small --seed 42 > fixtures/small.json

use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use test_data_gen::{Generator, Scale};

#[derive(Parser, Debug)]
#[command(name = "gen-fixtures")]
#[command(about = "Generate snapshot fixtures for schema-graph", long_about = None)]
struct Args {
    /// Scale preset: small, medium, large, xlarge
    #[arg(short, long, default_value = "small")]
    scale: String,

    /// Random seed for reproducibility
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let scale: Scale = args.scale.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut gen = Generator::new(args.seed, scale);
    let snapshot = gen.generate();
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(ref path) = args.output {
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        eprintln!(
            "Generated {} tables, {} relationships to {}",
            snapshot.tables.len(),
            snapshot.relationships.len(),
            path
        );
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        lock.write_all(json.as_bytes())?;
        writeln!(lock)?;
    }

    Ok(())
}
