use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue category a rule belongs to, e.g. `css`, `dom`, `media`.
/// Display labels are localized by the rendering layer; the engine only
/// groups by the raw key.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Category(pub String);

impl Category {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deprecation metadata. The release may be unknown for features that were
/// deprecated before release notes tracked them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deprecation {
    #[serde(default)]
    pub release: Option<String>,
}

/// Removal metadata. A removal always names the release it shipped in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Removal {
    pub release: String,
}

/// One compatibility check: a feature probe plus the metadata needed to
/// describe a match to the user. Immutable once loaded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub title: String,
    pub description: String,
    pub category: Category,
    /// CSS selector matched against the candidate element.
    #[serde(default)]
    pub selector: Option<String>,
    /// Named page-global capability test, dispatched by the evaluation
    /// boundary. Ignored when `selector` is present.
    #[serde(default)]
    pub capability: Option<String>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
    #[serde(default)]
    pub removed: Option<Removal>,
    pub reference_url: String,
}

impl Rule {
    /// Typed probe for this rule. `selector` wins over `capability`; a rule
    /// with neither returns `None` and is skipped by the checker.
    pub fn probe(&self) -> Option<Probe> {
        if let Some(selector) = &self.selector {
            return Some(Probe::Selector(selector.clone()));
        }

        self.capability
            .as_ref()
            .map(|name| Probe::Capability(name.clone()))
    }
}

/// What a rule actually tests, decoupled from how the inspected page runs it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Probe {
    /// The candidate element matches this CSS selector.
    Selector(String),
    /// A page-global capability test identified by name.
    Capability(String),
}

impl Probe {
    /// Whether the probe is evaluated against a candidate element (as opposed
    /// to the page as a whole).
    pub fn references_candidate(&self) -> bool {
        matches!(self, Probe::Selector(_))
    }
}

/// Ordered, immutable sequence of rules.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
