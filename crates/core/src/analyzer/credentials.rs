//! Hardcoded credential rule: string literals assigned or used as initializers
//!
//! A plain case-sensitive substring test on the unquoted literal text. It is a
//! heuristic: `"passwordless"` matches, `"Password"` does not.

use crate::analyzer::Rule;
use crate::ast::{Node, NodeKind};
use crate::config::GosentryConfig;
use crate::finding::{Diagnostic, FindingSet, RuleKind};

pub struct HardcodedCredentialRule {
    keywords: Vec<String>,
}

impl HardcodedCredentialRule {
    /// Rule with the default keywords, `password` and `secret`
    pub fn new() -> Self {
        Self::with_keywords(GosentryConfig::default().credentials.keywords)
    }

    pub fn with_keywords(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    fn is_credential(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    fn check_values(&self, values: &[Node], findings: &mut FindingSet) {
        for value in values {
            let Some(lit) = value.as_basic_lit() else {
                continue;
            };
            if !lit.is_string() {
                continue;
            }
            let text = lit.unquoted();
            if self.is_credential(text) {
                findings.push_diagnostic(Diagnostic::new(
                    RuleKind::Credentials,
                    format!("Potential hardcoded credential found: {}", text),
                    value.span,
                ));
            }
        }
    }
}

impl Default for HardcodedCredentialRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for HardcodedCredentialRule {
    fn name(&self) -> &str {
        "Hardcoded Credentials"
    }

    fn is_enabled(&self, config: &GosentryConfig) -> bool {
        config.rules.credentials
    }

    fn check(&self, node: &Node, findings: &mut FindingSet) {
        match &node.kind {
            NodeKind::Assign { rhs, .. } => self.check_values(rhs, findings),
            NodeKind::ValueSpec { values, .. } => self.check_values(values, findings),
            _ => {}
        }
    }
}
