//! Compatibility rule catalog: the immutable list of feature checks the
//! engine evaluates against the inspected page, and the loader that reads
//! it from the extension's bundled data file.

pub mod errors;
pub mod loader;
pub mod model;

pub use errors::CatalogError;
pub use loader::{CatalogLoader, RULE_DATA_PATH};
pub use model::{Category, Deprecation, Probe, Removal, Rule, RuleCatalog};
