use async_trait::async_trait;

use sitecompat_core_types::EvaluationScope;
use sitecompat_issue_checker::RunReport;

/// Rendering boundary. The session hands over finished run reports and
/// nothing else; markup rendering, category labels and localization all
/// happen on the other side.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn publish(&self, scope: EvaluationScope, report: RunReport);
}
