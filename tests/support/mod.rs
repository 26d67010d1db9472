#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use sitecompat_devtools::{
    Envelope, EvalError, EvalRequest, EvaluationScope, ExtensionId, InspectedPage,
    LifecycleMessage, ObserverKind, ReportSink, RunReport, SessionConfig, TabId,
};

pub const OWN_ID: &str = "compat-tools@example.org";

pub const CATALOG: &str = r#"[
    {
        "title": "Marquee element",
        "description": "The <marquee> element is non-standard.",
        "category": "html",
        "selector": "marquee",
        "deprecated": { "release": "70" },
        "removed": { "release": "75" },
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

/// Write the rule data file under a fresh install root.
pub fn install_root_with(catalog: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("compatibility.json"), catalog).unwrap();
    dir
}

pub fn config_for(install_root: &Path) -> SessionConfig {
    SessionConfig {
        install_root: install_root.to_path_buf(),
        extension: ExtensionId::new(OWN_ID),
        tab: TabId(7),
        channel_capacity: 32,
    }
}

pub fn envelope(message: LifecycleMessage) -> Envelope {
    Envelope {
        sender: ExtensionId::new(OWN_ID),
        message,
    }
}

pub fn foreign_envelope(message: LifecycleMessage) -> Envelope {
    Envelope {
        sender: ExtensionId::new("impostor@example.org"),
        message,
    }
}

pub fn opened(observer: ObserverKind) -> Envelope {
    envelope(LifecycleMessage::ObserverOpened { observer })
}

/// Inspected-page fake backed by fixed selector and capability sets. An
/// optional gate makes every evaluation wait for one permit, letting tests
/// hold a run in flight.
pub struct FakePage {
    pub matching_selectors: Vec<&'static str>,
    pub capabilities: Vec<&'static str>,
    pub selection_present: bool,
    pub gate: Option<Arc<Semaphore>>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            matching_selectors: vec!["marquee"],
            capabilities: vec!["window.showModalDialog"],
            selection_present: true,
            gate: None,
        }
    }
}

#[async_trait]
impl InspectedPage for FakePage {
    async fn eval(&self, request: EvalRequest) -> Result<Option<bool>, EvalError> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.map_err(|_| EvalError::ChannelClosed)?.forget();
        }

        let matched = match request {
            EvalRequest::AnyMatches { selector } | EvalRequest::SelectedMatches { selector } => {
                self.matching_selectors.contains(&selector.as_str())
            }
            EvalRequest::Capability { name } => self.capabilities.contains(&name.as_str()),
            EvalRequest::SelectionPresent => self.selection_present,
        };
        Ok(Some(matched))
    }
}

/// Report sink collecting everything the session publishes.
#[derive(Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<(EvaluationScope, RunReport)>>,
}

impl CollectingSink {
    pub fn reports(&self) -> Vec<(EvaluationScope, RunReport)> {
        self.reports.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.reports.lock().len()
    }

    /// Wait until `expected` reports have been published, panicking if that
    /// does not happen within two seconds.
    pub async fn wait_for(&self, expected: usize) {
        for _ in 0..400 {
            if self.count() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "expected {expected} published reports, saw {}",
            self.count()
        );
    }

    /// Give any unexpected publish a chance to land, then assert the count
    /// has not moved past `expected`.
    pub async fn assert_settled_at(&self, expected: usize) {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(self.count(), expected);
    }
}

#[async_trait]
impl ReportSink for CollectingSink {
    async fn publish(&self, scope: EvaluationScope, report: RunReport) {
        self.reports.lock().push((scope, report));
    }
}
