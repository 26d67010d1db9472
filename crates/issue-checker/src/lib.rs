//! Issue checker: runs every catalog rule against the inspected page and
//! assembles the categorized issue report handed to the rendering layer.

pub mod checker;
pub mod html;
pub mod report;
pub mod summary;

pub use checker::CompatChecker;
pub use report::{Issue, IssueReport, RunReport};
