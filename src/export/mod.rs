//! Output format implementations for positioned schema graphs.

mod dot;
pub(crate) mod json;
mod mermaid;

pub use dot::to_dot;
pub use json::to_json;
pub use mermaid::to_mermaid;
#[allow(unused_imports)]
pub use json::{EdgeJson, GraphJson, NodeJson, StatsJson};

use std::fmt;
use std::str::FromStr;

/// Output format for graph export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Graphviz DOT with pinned node positions
    #[default]
    Dot,
    /// JSON with full node/edge detail
    Json,
    /// Mermaid erDiagram format
    Mermaid,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            "mermaid" | "mmd" => Ok(OutputFormat::Mermaid),
            _ => Err(format!(
                "Unknown format: {}. Valid options: dot, json, mermaid",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Mermaid => write!(f, "mermaid"),
        }
    }
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Json => "json",
            OutputFormat::Mermaid => "mmd",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "dot" | "gv" => Some(OutputFormat::Dot),
            "json" => Some(OutputFormat::Json),
            "mmd" | "mermaid" => Some(OutputFormat::Mermaid),
            _ => None,
        }
    }
}
