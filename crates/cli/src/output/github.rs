//! GitHub Actions workflow command output format
//!
//! Produces `::error`, `::warning`, and `::notice` annotations for inline PR feedback.

use gosentry_core::{Finding, Severity};
use std::path::Path;

/// Format a finding as a GitHub Actions workflow command.
///
/// See: https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions
pub fn format_finding(finding: &Finding, root: &Path) -> String {
    let level = match finding.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "notice",
    };
    format!(
        "::{level} file={},line={},col={},title={}::{msg}",
        super::display_path(&finding.file, root),
        finding.line,
        finding.column,
        finding.id,
        level = level,
        msg = finding.message,
    )
}
