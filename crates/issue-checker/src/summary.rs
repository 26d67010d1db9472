//! Issue summary composition. The phrasing here is part of the product
//! surface; tests pin the exact strings.

use sitecompat_rule_catalog::Rule;

use crate::html::escape;

/// Status clause describing when the feature was deprecated and removed.
/// `None` for rules carrying neither deprecation nor removal metadata.
fn status_clause(rule: &Rule) -> Option<String> {
    if let Some(removal) = &rule.removed {
        let removed = escape(&removal.release);
        let clause = match rule
            .deprecated
            .as_ref()
            .and_then(|deprecation| deprecation.release.as_deref())
        {
            Some(release) => format!(
                "Deprecated in release {}, removed in release {}.",
                escape(release),
                removed
            ),
            None => format!("Deprecated in an unknown release, removed in release {removed}."),
        };
        return Some(clause);
    }

    rule.deprecated.as_ref().map(|deprecation| {
        match deprecation.release.as_deref() {
            Some(release) => format!("Deprecated in release {}.", escape(release)),
            None => "Deprecated in an unknown release.".to_string(),
        }
    })
}

/// Render the full summary markup for a matched rule. Every interpolated
/// fragment is escaped before concatenation.
pub fn summarize(rule: &Rule) -> String {
    let mut summary = format!("<strong>{}</strong>: ", escape(&rule.title));

    if let Some(status) = status_clause(rule) {
        summary.push_str(&status);
        summary.push(' ');
    }

    summary.push_str(&escape(&rule.description));
    summary.push_str(&format!(
        " (<a href=\"{}\">Details</a>)",
        escape(&rule.reference_url)
    ));
    summary
}

#[cfg(test)]
mod tests {
    use sitecompat_rule_catalog::{Category, Deprecation, Removal};

    use super::*;

    fn rule() -> Rule {
        Rule {
            title: "Feature".into(),
            description: "Use the replacement instead.".into(),
            category: Category::new("dom"),
            selector: None,
            capability: Some("window.feature".into()),
            deprecated: None,
            removed: None,
            reference_url: "https://example.org/feature".into(),
        }
    }

    #[test]
    fn known_deprecation_and_removal() {
        let mut r = rule();
        r.deprecated = Some(Deprecation {
            release: Some("70".into()),
        });
        r.removed = Some(Removal {
            release: "75".into(),
        });
        assert_eq!(
            summarize(&r),
            "<strong>Feature</strong>: Deprecated in release 70, removed in release 75. \
             Use the replacement instead. \
             (<a href=\"https:&sol;&sol;example.org&sol;feature\">Details</a>)"
        );
    }

    #[test]
    fn removal_with_unknown_deprecation() {
        let mut r = rule();
        r.removed = Some(Removal {
            release: "75".into(),
        });
        assert_eq!(
            summarize(&r),
            "<strong>Feature</strong>: Deprecated in an unknown release, removed in release 75. \
             Use the replacement instead. \
             (<a href=\"https:&sol;&sol;example.org&sol;feature\">Details</a>)"
        );
    }

    #[test]
    fn deprecation_only_with_known_release() {
        let mut r = rule();
        r.deprecated = Some(Deprecation {
            release: Some("70".into()),
        });
        assert_eq!(
            summarize(&r),
            "<strong>Feature</strong>: Deprecated in release 70. \
             Use the replacement instead. \
             (<a href=\"https:&sol;&sol;example.org&sol;feature\">Details</a>)"
        );
    }

    #[test]
    fn deprecation_only_with_unknown_release() {
        let mut r = rule();
        r.deprecated = Some(Deprecation { release: None });
        assert_eq!(
            summarize(&r),
            "<strong>Feature</strong>: Deprecated in an unknown release. \
             Use the replacement instead. \
             (<a href=\"https:&sol;&sol;example.org&sol;feature\">Details</a>)"
        );
    }

    #[test]
    fn no_status_clause_without_metadata() {
        assert_eq!(
            summarize(&rule()),
            "<strong>Feature</strong>: Use the replacement instead. \
             (<a href=\"https:&sol;&sol;example.org&sol;feature\">Details</a>)"
        );
    }

    #[test]
    fn interpolated_fields_are_escaped() {
        let mut r = rule();
        r.title = "<marquee> & friends".into();
        r.description = "Don't use \"scrolling\" text.".into();
        let summary = summarize(&r);
        assert!(summary.starts_with("<strong>&lt;marquee&gt; &amp; friends</strong>: "));
        assert!(summary.contains("Don&apos;t use &quot;scrolling&quot; text."));
    }
}
