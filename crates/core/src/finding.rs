//! Finding types produced by the rule engine and consumed by output formatters

use crate::ast::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity level of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Which check produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    Syntax,
    Naming,
    Credentials,
    SqlInjection,
}

impl RuleKind {
    /// Finding ID prefix (e.g. "CRED" produces "CRED-001", "CRED-002", ...)
    pub fn prefix(&self) -> &'static str {
        match self {
            RuleKind::Syntax => "PARSE",
            RuleKind::Naming => "NAME",
            RuleKind::Credentials => "CRED",
            RuleKind::SqlInjection => "SQL",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RuleKind::Syntax => Severity::Error,
            RuleKind::Naming => Severity::Warning,
            RuleKind::Credentials => Severity::Error,
            RuleKind::SqlInjection => Severity::Error,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuleKind::Syntax => "Source could not be parsed",
            RuleKind::Naming => "Function name does not start with a lowercase letter",
            RuleKind::Credentials => "Possible hardcoded credential",
            RuleKind::SqlInjection => "SQL statement shaped for injection",
        }
    }

    /// Look up a rule by its ID prefix
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "PARSE" => Some(RuleKind::Syntax),
            "NAME" => Some(RuleKind::Naming),
            "CRED" => Some(RuleKind::Credentials),
            "SQL" => Some(RuleKind::SqlInjection),
            _ => None,
        }
    }
}

/// One finding inside a single file.
///
/// `Display` yields only the message, which is the flat form callers print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: RuleKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(rule: RuleKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            rule,
            severity: rule.severity(),
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything one analysis produced for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSet {
    /// Diagnostics in traversal order
    pub diagnostics: Vec<Diagnostic>,

    /// Import paths in declaration order, duplicates kept
    pub imports: Vec<String>,

    /// Nodes visited by the traversal (0 when parsing failed)
    pub nodes_visited: usize,
}

impl FindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn push_import(&mut self, path: impl Into<String>) {
        self.imports.push(path.into());
    }

    /// Diagnostic messages as plain strings
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn count(&self, rule: RuleKind) -> usize {
        self.diagnostics.iter().filter(|d| d.rule == rule).count()
    }
}

/// A diagnostic attributed to a file, ready for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier (e.g. "CRED-001")
    pub id: String,

    pub rule: RuleKind,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// File where the finding was detected
    pub file: PathBuf,

    /// Line number in the file
    pub line: usize,

    /// Column of the triggering node
    pub column: usize,
}

/// Summary of an entire scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub files_analyzed: usize,
    pub nodes_visited: usize,
    pub suppressed: usize,
}

impl ScanSummary {
    /// Tally findings by severity
    pub fn record(&mut self, findings: &[Finding]) {
        for f in findings {
            match f.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
                Severity::Info => self.info += 1,
            }
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }
}
