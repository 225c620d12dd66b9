//! SARIF 2.1.0 output formatting
//!
//! Produces Static Analysis Results Interchange Format for GitHub Code Scanning
//! and IDE consumption.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use gosentry_core::{Finding, RuleKind, Severity};

// ── SARIF 2.1.0 structs ─────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SarifLog {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifDriver {
    pub name: String,
    pub semantic_version: String,
    pub rules: Vec<SarifReportingDescriptor>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifReportingDescriptor {
    pub id: String,
    pub short_description: SarifMessage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    pub rule_index: usize,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
    pub region: SarifRegion,
}

#[derive(Debug, Serialize)]
pub struct SarifArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: usize,
    pub start_column: usize,
}

#[derive(Debug, Serialize)]
pub struct SarifMessage {
    pub text: String,
}

// ── Helpers ──────────────────────────────────────────────────────

fn severity_to_level(severity: &Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

/// Forward-slash path relative to the scan root
fn relative_uri(file: &Path, root: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

// ── Public API ───────────────────────────────────────────────────

/// Build a complete SARIF 2.1.0 log from a list of findings.
///
/// One reporting descriptor is emitted per rule that produced a finding,
/// ordered by prefix.
pub fn build_sarif_log(findings: &[Finding], root: &Path) -> SarifLog {
    let mut kinds: BTreeMap<&'static str, RuleKind> = BTreeMap::new();
    for f in findings {
        kinds.entry(f.rule.prefix()).or_insert(f.rule);
    }

    let rules: Vec<SarifReportingDescriptor> = kinds
        .iter()
        .map(|(prefix, kind)| SarifReportingDescriptor {
            id: prefix.to_string(),
            short_description: SarifMessage {
                text: kind.description().to_string(),
            },
        })
        .collect();

    let prefix_index: BTreeMap<&str, usize> = kinds
        .keys()
        .enumerate()
        .map(|(i, k)| (*k, i))
        .collect();

    let results: Vec<SarifResult> = findings
        .iter()
        .map(|f| {
            let prefix = f.rule.prefix();
            SarifResult {
                rule_id: prefix.to_string(),
                rule_index: prefix_index.get(prefix).copied().unwrap_or(0),
                level: severity_to_level(&f.severity).to_string(),
                message: SarifMessage {
                    text: f.message.clone(),
                },
                locations: vec![SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: relative_uri(&f.file, root),
                        },
                        region: SarifRegion {
                            start_line: f.line.max(1),
                            start_column: f.column.max(1),
                        },
                    },
                }],
            }
        })
        .collect();

    SarifLog {
        schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "gosentry".to_string(),
                    semantic_version: gosentry_core::VERSION.to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_uri_uses_forward_slashes() {
        let uri = relative_uri(Path::new("/repo/cmd/server/main.go"), Path::new("/repo"));
        assert_eq!(uri, "cmd/server/main.go");
    }

    #[test]
    fn relative_uri_outside_root_is_kept() {
        let uri = relative_uri(Path::new("/elsewhere/x.go"), Path::new("/repo"));
        assert_eq!(uri, "/elsewhere/x.go");
    }
}
