use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::MetadataSnapshot;

/// Compression detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq)]
enum Compression {
    None,
    Gzip,
}

impl Compression {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => Compression::Gzip,
            _ => Compression::None,
        }
    }
}

/// Snapshot format detected from the file extension (after stripping `.gz`)
#[derive(Debug, Clone, Copy, PartialEq)]
enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let inner = match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => Path::new(path.file_stem().unwrap_or_default()),
            _ => path,
        };

        match inner.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Ok(SnapshotFormat::Yaml),
            Some(other) => bail!(
                "Unsupported snapshot format '.{}' (expected .json, .yaml, or .yml, optionally gzipped)",
                other
            ),
            None => bail!(
                "Cannot detect snapshot format for '{}' (expected .json, .yaml, or .yml extension)",
                path.display()
            ),
        }
    }
}

/// Load a metadata snapshot from disk.
///
/// The format is detected from the extension: `.json`, `.yaml`, or `.yml`,
/// each optionally wrapped in gzip (`.json.gz` etc.).
pub fn load_snapshot(path: &Path) -> Result<MetadataSnapshot> {
    let format = SnapshotFormat::from_path(path)?;

    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot file: {}", path.display()))?;

    let mut reader: Box<dyn Read> = match Compression::from_path(path) {
        Compression::Gzip => Box::new(GzDecoder::new(BufReader::new(file))),
        Compression::None => Box::new(BufReader::new(file)),
    };

    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;

    let snapshot: MetadataSnapshot = match format {
        SnapshotFormat::Json => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON snapshot: {}", path.display()))?,
        SnapshotFormat::Yaml => serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML snapshot: {}", path.display()))?,
    };

    Ok(snapshot)
}
