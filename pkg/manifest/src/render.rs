use pkg_types::ingress::IngressList;
use std::fmt;
use std::str::FromStr;

use crate::error::{BuildError, Result};

/// Serialization used for the printed manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{}' (expected json or yaml)", other)),
        }
    }
}

/// Render the list as pretty JSON (two-space indent) or YAML, newline-terminated.
pub fn render(list: &IngressList, format: OutputFormat) -> Result<String> {
    let mut out = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(list).map_err(|e| BuildError::Render(e.to_string()))?
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(list).map_err(|e| BuildError::Render(e.to_string()))?
        }
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
