use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading the rule catalog. Surfaced to the caller of
/// `CatalogLoader::load`; never retried automatically.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read rule data at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rule data at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
