//! Function naming rule: function and method names must start lowercase

use crate::analyzer::Rule;
use crate::ast::{Node, NodeKind};
use crate::config::GosentryConfig;
use crate::finding::{Diagnostic, FindingSet, RuleKind};

/// Flags function and method declarations whose name starts with a character
/// that changes under lowercasing.
pub struct FunctionNamingRule;

impl FunctionNamingRule {
    pub fn new() -> Self {
        Self
    }

    /// Empty names fail.
    pub fn starts_lowercase(name: &str) -> bool {
        match name.chars().next() {
            Some(first) => first.to_lowercase().eq(std::iter::once(first)),
            None => false,
        }
    }
}

impl Default for FunctionNamingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for FunctionNamingRule {
    fn name(&self) -> &str {
        "Function Naming"
    }

    fn is_enabled(&self, config: &GosentryConfig) -> bool {
        config.rules.naming
    }

    fn check(&self, node: &Node, findings: &mut FindingSet) {
        if let NodeKind::FuncDecl { name, .. } = &node.kind {
            if !Self::starts_lowercase(&name.name) {
                findings.push_diagnostic(Diagnostic::new(
                    RuleKind::Naming,
                    format!("identifier '{}' should start with lowercase", name.name),
                    name.span,
                ));
            }
        }
    }
}
