//! Batch scanning: one analysis per file, files in parallel
//!
//! Every file gets its own [`FindingSet`]; nothing is shared between files
//! except the read-only engine. A file that cannot be read is reported and
//! the batch moves on.

use crate::analyzer::RuleEngine;
use crate::config::GosentryConfig;
use crate::finding::{Finding, FindingSet, ScanSummary};
use crate::suppress::apply_inline_suppressions;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Outcome of analyzing one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: FindingSet,
    /// Diagnostics removed by inline `gosentry-ignore` comments
    pub suppressed: usize,
    /// Set when the file could not be read; `findings` is then empty
    pub read_error: Option<String>,
}

impl FileReport {
    /// File name without its extension, as shown in terminal output
    pub fn display_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Analyze a single source file
pub fn scan_file(engine: &RuleEngine, path: &Path) -> FileReport {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("error reading file {}: {}", path.display(), e);
            return FileReport {
                path: path.to_path_buf(),
                findings: FindingSet::new(),
                suppressed: 0,
                read_error: Some(format!("error reading file {}: {}", path.display(), e)),
            };
        }
    };

    let mut findings = engine.analyze(&content);
    let suppressed = apply_inline_suppressions(&mut findings, &content);
    log::debug!(
        "{}: {} diagnostic(s), {} import(s), {} suppressed",
        path.display(),
        findings.diagnostics.len(),
        findings.imports.len(),
        suppressed
    );

    FileReport {
        path: path.to_path_buf(),
        findings,
        suppressed,
        read_error: None,
    }
}

/// Analyze many files in parallel.
///
/// Reports come back in the order of `files`.
pub fn scan_files(engine: &RuleEngine, files: &[PathBuf]) -> Vec<FileReport> {
    files
        .par_iter()
        .map(|file| scan_file(engine, file))
        .collect()
}

/// Flatten per-file reports into file-tagged findings.
///
/// Finding IDs are numbered per rule prefix across the whole scan
/// (e.g., CRED-001, CRED-002, ...). IDs listed in `ignore.findings` are
/// dropped after numbering.
pub fn collect_findings(reports: &[FileReport], config: &GosentryConfig) -> Vec<Finding> {
    for id in config.ignore.unknown_finding_ids() {
        log::warn!("ignored finding '{}' does not belong to any rule", id);
    }

    let mut counters: HashMap<&'static str, usize> = HashMap::new();
    let mut findings = Vec::new();

    for report in reports {
        for diagnostic in &report.findings.diagnostics {
            let prefix = diagnostic.rule.prefix();
            let counter = counters.entry(prefix).or_insert(0);
            *counter += 1;

            findings.push(Finding {
                id: format!("{}-{:03}", prefix, counter),
                rule: diagnostic.rule,
                severity: diagnostic.severity,
                message: diagnostic.message.clone(),
                file: report.path.clone(),
                line: diagnostic.span.line,
                column: diagnostic.span.column,
            });
        }
    }

    findings
        .into_iter()
        .filter(|f| !config.ignore.findings.contains(&f.id))
        .collect()
}

/// Summarize a scan
pub fn summarize(reports: &[FileReport], findings: &[Finding]) -> ScanSummary {
    let mut summary = ScanSummary {
        files_analyzed: reports.len(),
        nodes_visited: reports.iter().map(|r| r.findings.nodes_visited).sum(),
        suppressed: reports.iter().map(|r| r.suppressed).sum(),
        ..Default::default()
    };
    summary.record(findings);
    summary
}
