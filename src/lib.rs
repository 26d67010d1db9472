//! SiteCompat DevTools engine: evaluates a catalog of compatibility rules
//! against the inspected page and reports categorized issues, re-running
//! whenever the cross-context lifecycle protocol says the page has finished
//! loading. The host extension embeds [`session::DevtoolsSession`] in its
//! DevTools context and [`NotificationBridge`] in its background context.

pub mod config;
pub mod session;
pub mod sink;

pub use config::SessionConfig;
pub use session::{DevtoolsSession, SessionHandle};
pub use sink::ReportSink;

pub use sitecompat_bridge::{BridgeConfig, BridgeHandle, BridgeStats, NotificationBridge};
pub use sitecompat_core_types::{EvaluationScope, ExtensionId, RequestId, SessionId, TabId};
pub use sitecompat_issue_checker::{CompatChecker, Issue, IssueReport, RunReport};
pub use sitecompat_lifecycle::{
    Envelope, LifecycleMessage, ObserverKind, PageLifecycleTracker, TabEvent, TabStatus,
};
pub use sitecompat_page_inspect::{
    ChannelInspectedPage, ElementEvaluator, EvalError, EvalRequest, InspectedPage, PageCommand,
    PageResponse, Verdict,
};
pub use sitecompat_rule_catalog::{CatalogError, CatalogLoader, Probe, Rule, RuleCatalog};
