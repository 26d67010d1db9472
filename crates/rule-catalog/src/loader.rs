use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::errors::CatalogError;
use crate::model::RuleCatalog;

/// Location of the rule data file, relative to the extension install root.
pub const RULE_DATA_PATH: &str = "data/compatibility.json";

/// Loads the rule catalog at most once per loader instance. A successful
/// load is memoized for the lifetime of the loader; a failed load is not,
/// so the caller may retry on its next invocation.
pub struct CatalogLoader {
    path: PathBuf,
    cache: OnceCell<Arc<RuleCatalog>>,
}

impl CatalogLoader {
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            path: install_root.into().join(RULE_DATA_PATH),
            cache: OnceCell::new(),
        }
    }

    pub async fn load(&self) -> Result<Arc<RuleCatalog>, CatalogError> {
        self.cache
            .get_or_try_init(|| async {
                let bytes =
                    tokio::fs::read(&self.path)
                        .await
                        .map_err(|source| CatalogError::Read {
                            path: self.path.clone(),
                            source,
                        })?;
                let catalog: RuleCatalog =
                    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
                        path: self.path.clone(),
                        source,
                    })?;
                info!(
                    target: "rule-catalog",
                    rules = catalog.len(),
                    path = %self.path.display(),
                    "loaded compatibility rule catalog"
                );
                Ok(Arc::new(catalog))
            })
            .await
            .cloned()
            .map_err(|err| {
                debug!(target: "rule-catalog", error = %err, "catalog load failed");
                err
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {
            "title": "Marquee element",
            "description": "The <marquee> element is non-standard.",
            "category": "html",
            "selector": "marquee",
            "deprecated": { "release": "68" },
            "reference_url": "https://example.org/marquee"
        },
        {
            "title": "showModalDialog",
            "description": "window.showModalDialog has been removed.",
            "category": "dom",
            "capability": "window.showModalDialog",
            "removed": { "release": "56" },
            "reference_url": "https://example.org/modal"
        }
    ]"#;

    fn write_fixture(dir: &std::path::Path, contents: &str) {
        let data_dir = dir.join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("compatibility.json"), contents).unwrap();
    }

    #[tokio::test]
    async fn loads_and_memoizes_catalog() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), FIXTURE);

        let loader = CatalogLoader::new(dir.path());
        let first = loader.load().await.unwrap();
        assert_eq!(first.len(), 2);

        // Second load must come from the cache, not the file.
        std::fs::remove_file(dir.path().join(RULE_DATA_PATH)).unwrap();
        let second = loader.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CatalogLoader::new(dir.path());
        assert!(matches!(
            loader.load().await,
            Err(CatalogError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_document_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "{ not json ]");
        let loader = CatalogLoader::new(dir.path());
        assert!(matches!(
            loader.load().await,
            Err(CatalogError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn failed_load_is_retried_on_next_call() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CatalogLoader::new(dir.path());
        assert!(loader.load().await.is_err());

        write_fixture(dir.path(), FIXTURE);
        let catalog = loader.load().await.unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
