use std::sync::Arc;

use tracing::debug;

use sitecompat_core_types::EvaluationScope;
use sitecompat_rule_catalog::{Probe, Rule};

use crate::model::{EvalRequest, Verdict};
use crate::ports::InspectedPage;

/// Resolves a rule's probe into a concrete request for the current scope and
/// submits it to the inspected page.
#[derive(Clone)]
pub struct ElementEvaluator {
    page: Arc<dyn InspectedPage>,
}

impl ElementEvaluator {
    pub fn new(page: Arc<dyn InspectedPage>) -> Self {
        Self { page }
    }

    /// Evaluate one rule. A rule without a probe, and a page-global probe in
    /// single-element scope, are both non-matches that never reach the
    /// boundary; the latter is a policy short-circuit, not an error.
    pub async fn evaluate(&self, rule: &Rule, scope: EvaluationScope) -> Verdict {
        let probe = match rule.probe() {
            Some(probe) => probe,
            None => return Verdict::miss(),
        };

        let request = match (probe, scope) {
            (Probe::Selector(selector), EvaluationScope::SingleElement) => {
                EvalRequest::SelectedMatches { selector }
            }
            (Probe::Selector(selector), EvaluationScope::WholePage) => {
                EvalRequest::AnyMatches { selector }
            }
            (Probe::Capability(_), EvaluationScope::SingleElement) => {
                return Verdict::miss();
            }
            (Probe::Capability(name), EvaluationScope::WholePage) => {
                EvalRequest::Capability { name }
            }
        };

        match self.page.eval(request).await {
            Ok(Some(true)) => Verdict::hit(),
            Ok(_) => Verdict::miss(),
            Err(error) => {
                debug!(
                    target: "page-inspect",
                    rule = %rule.title,
                    error = %error,
                    "rule evaluation failed in the inspected page"
                );
                Verdict::failed(error)
            }
        }
    }

    /// Whether an element is currently selected in the inspector. Selection
    /// change events also fire during navigation with nothing selected, so
    /// callers check this before starting a single-element pass.
    pub async fn selection_present(&self) -> bool {
        matches!(
            self.page.eval(EvalRequest::SelectionPresent).await,
            Ok(Some(true))
        )
    }
}
