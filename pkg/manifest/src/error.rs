use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

/// Every failure is fatal; the CLI exits on the first one.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("could not read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {}: {message}", .path.display())]
    ParseConfig { path: PathBuf, message: String },

    /// A host entry was neither a hostname string nor a host object.
    #[error("invalid host entry in {}: {message}", .path.display())]
    HostEntryShape { path: PathBuf, message: String },

    #[error(
        "service-name required for host '{host}'{}: set it on the host or at the top level",
        .group.as_deref().map(|g| format!(" in group '{g}'")).unwrap_or_default()
    )]
    MissingServiceName { host: String, group: Option<String> },

    #[error("could not render ingress list: {0}")]
    Render(String),
}
