use serde::Serialize;

use sitecompat_rule_catalog::Category;

/// One matched rule, ready for rendering.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Issue {
    pub category: Category,
    pub summary_html: String,
}

/// Issues grouped by category. Category order is the order of first match
/// while scanning the catalog; issue order within a category is catalog
/// order. Rebuilt from scratch on every evaluation pass, never persisted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct IssueReport {
    sections: Vec<(Category, Vec<Issue>)>,
}

impl IssueReport {
    pub fn push(&mut self, issue: Issue) {
        match self
            .sections
            .iter_mut()
            .find(|(category, _)| *category == issue.category)
        {
            Some((_, issues)) => issues.push(issue),
            None => self.sections.push((issue.category.clone(), vec![issue])),
        }
    }

    pub fn sections(&self) -> &[(Category, Vec<Issue>)] {
        &self.sections
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sections.iter().map(|(category, _)| category)
    }

    pub fn total(&self) -> usize {
        self.sections.iter().map(|(_, issues)| issues.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Everything one checker pass produces. `rules_error` distinguishes "could
/// not load rules" from an honest empty report, so the renderer can show a
/// different state for each; `eval_failures` counts rules whose remote
/// evaluation failed and was treated as a non-match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RunReport {
    pub issues: IssueReport,
    pub rules_error: Option<String>,
    pub eval_failures: u32,
}

impl RunReport {
    pub fn rules_unavailable(message: impl Into<String>) -> Self {
        Self {
            rules_error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(category: &str, summary: &str) -> Issue {
        Issue {
            category: Category::new(category),
            summary_html: summary.into(),
        }
    }

    #[test]
    fn categories_keep_first_match_order() {
        let mut report = IssueReport::default();
        report.push(issue("css", "a"));
        report.push(issue("dom", "b"));
        report.push(issue("css", "c"));

        let categories: Vec<_> = report.categories().map(Category::as_str).collect();
        assert_eq!(categories, ["css", "dom"]);
        assert_eq!(report.sections()[0].1.len(), 2);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn rules_unavailable_report_is_empty_but_flagged() {
        let report = RunReport::rules_unavailable("could not load rules");
        assert!(report.issues.is_empty());
        assert_eq!(report.rules_error.as_deref(), Some("could not load rules"));
    }
}
