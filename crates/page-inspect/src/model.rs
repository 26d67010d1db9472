use serde::{Deserialize, Serialize};

use crate::errors::EvalError;

/// A fully resolved request for the inspected page. The page-side dispatcher
/// interprets the variant; no executable strings cross the boundary.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum EvalRequest {
    /// Does the currently selected element match this selector?
    SelectedMatches { selector: String },
    /// Does any element in the document match this selector?
    AnyMatches { selector: String },
    /// Run the named page-global capability test.
    Capability { name: String },
    /// Is an element currently selected in the inspector at all?
    SelectionPresent,
}

/// Outcome of evaluating one rule. `matched` is true only for an exact
/// `true` from the page; an evaluation failure is carried alongside a
/// non-match so callers can count it without special-casing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Verdict {
    pub matched: bool,
    pub error: Option<EvalError>,
}

impl Verdict {
    pub fn hit() -> Self {
        Self {
            matched: true,
            error: None,
        }
    }

    pub fn miss() -> Self {
        Self {
            matched: false,
            error: None,
        }
    }

    pub fn failed(error: EvalError) -> Self {
        Self {
            matched: false,
            error: Some(error),
        }
    }
}
