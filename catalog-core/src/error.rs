use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the catalog core
///
/// Filtering, pagination and windowing never fail; only the edges
/// (fetching and configuration) produce errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to fetch content: {0}")]
    Fetch(String),

    #[error("Failed to parse catalog config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Failed to read catalog config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog config: {0}")]
    InvalidConfig(String),
}
