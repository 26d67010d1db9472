use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use sitecompat_core_types::EvaluationScope;
use sitecompat_page_inspect::ElementEvaluator;
use sitecompat_rule_catalog::{CatalogLoader, Rule};

use crate::report::{Issue, RunReport};
use crate::summary::summarize;

/// Runs the full rule catalog against the inspected page. Invocations must
/// be serialized per instance by the caller; the session loop does this.
pub struct CompatChecker {
    loader: Arc<CatalogLoader>,
    evaluator: ElementEvaluator,
}

impl CompatChecker {
    pub fn new(loader: Arc<CatalogLoader>, evaluator: ElementEvaluator) -> Self {
        Self { loader, evaluator }
    }

    /// One evaluation pass. Rules without a probe are skipped without
    /// touching the boundary; evaluation failures count as non-matches and
    /// never abort the batch. The report is only assembled once every
    /// outstanding evaluation has answered.
    pub async fn run(&self, scope: EvaluationScope) -> RunReport {
        let catalog = match self.loader.load().await {
            Ok(catalog) => catalog,
            Err(error) => {
                warn!(
                    target: "issue-checker",
                    error = %error,
                    "could not load compatibility rules"
                );
                return RunReport::rules_unavailable(error.to_string());
            }
        };

        let candidates: Vec<&Rule> = catalog
            .rules()
            .iter()
            .filter(|rule| rule.probe().is_some())
            .collect();

        let verdicts = join_all(
            candidates
                .iter()
                .map(|rule| self.evaluator.evaluate(rule, scope)),
        )
        .await;

        let mut report = RunReport::default();
        for (rule, verdict) in candidates.into_iter().zip(verdicts) {
            if let Some(error) = &verdict.error {
                debug!(
                    target: "issue-checker",
                    rule = %rule.title,
                    error = %error,
                    "treating failed evaluation as a non-match"
                );
                report.eval_failures += 1;
            }

            if verdict.matched {
                report.issues.push(Issue {
                    category: rule.category.clone(),
                    summary_html: summarize(rule),
                });
            }
        }

        info!(
            target: "issue-checker",
            scope = %scope,
            issues = report.issues.total(),
            eval_failures = report.eval_failures,
            "evaluation pass finished"
        );
        report
    }
}
