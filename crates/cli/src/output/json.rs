//! JSON output formatting

use gosentry_core::{FileReport, Finding, ScanSummary};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{display_path, findings_by_file};

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput {
    pub files: Vec<JsonFile>,
    pub summary: JsonSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFile {
    pub file: String,
    pub diagnostics: Vec<JsonFinding>,
    pub imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFinding {
    pub id: String,
    pub rule: String,
    pub severity: String,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JsonSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub files_analyzed: usize,
    pub nodes_visited: usize,
    pub suppressed: usize,
}

impl From<&ScanSummary> for JsonSummary {
    fn from(s: &ScanSummary) -> Self {
        Self {
            errors: s.errors,
            warnings: s.warnings,
            info: s.info,
            files_analyzed: s.files_analyzed,
            nodes_visited: s.nodes_visited,
            suppressed: s.suppressed,
        }
    }
}

/// Assemble the JSON document, one entry per scanned file in scan order
pub fn build_json_output(
    reports: &[FileReport],
    findings: &[Finding],
    summary: &ScanSummary,
    root: &Path,
) -> JsonOutput {
    let grouped = findings_by_file(findings);

    let files = reports
        .iter()
        .map(|report| JsonFile {
            file: display_path(&report.path, root),
            diagnostics: grouped
                .get(report.path.as_path())
                .map(|fs| {
                    fs.iter()
                        .map(|f| JsonFinding {
                            id: f.id.clone(),
                            rule: f.rule.prefix().to_string(),
                            severity: f.severity.to_string(),
                            message: f.message.clone(),
                            line: f.line,
                            column: f.column,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            imports: report.findings.imports.clone(),
            error: report.read_error.clone(),
        })
        .collect();

    JsonOutput {
        files,
        summary: summary.into(),
    }
}
