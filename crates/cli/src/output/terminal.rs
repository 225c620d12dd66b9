//! Terminal output formatting

use gosentry_core::{Finding, Severity};

/// `<icon> <stem>: <message> <line>:<col> [<id>]`
pub fn format_finding(finding: &Finding) -> String {
    let icon = match finding.severity {
        Severity::Error => "❌",
        Severity::Warning => "⚠️ ",
        Severity::Info => "ℹ️ ",
    };

    let stem = finding
        .file
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    format!(
        "  {} {}: {} {}:{} [{}]",
        icon, stem, finding.message, finding.line, finding.column, finding.id
    )
}

pub fn format_file_header(name: &str) -> String {
    format!("File: {}", name)
}

pub fn format_no_issues(name: &str) -> String {
    format!("No issues found in {}", name)
}

/// Heading plus one tab-indented line per import
pub fn format_imports(name: &str, imports: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(imports.len() + 1);
    lines.push(format!("List of imports in {}:", name));
    lines.extend(imports.iter().map(|i| format!("\t {}", i)));
    lines
}
