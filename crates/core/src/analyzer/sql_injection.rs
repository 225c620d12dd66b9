//! SQL injection rule: string literal call arguments shaped like SQL
//!
//! Matches the raw literal text (quotes and escapes intact) against a single
//! structural pattern: a DML keyword, some text, a `FROM`/`INTO`/`VALUES`
//! clause and an opening parenthesis directly after the clause keyword or
//! after its one target token. This is not data-flow analysis; queries
//! assembled across several expressions are never seen.

use crate::analyzer::Rule;
use crate::ast::{Node, NodeKind};
use crate::config::GosentryConfig;
use crate::finding::{Diagnostic, FindingSet, RuleKind};
use regex::Regex;
use std::sync::LazyLock;

/// Fixed message; the literal itself is not echoed
pub const SQL_INJECTION_MESSAGE: &str = "Potential SQL injection vulnerability found";

static SQL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:SELECT|INSERT|UPDATE|DELETE)\s+.+\s+(?:FROM|INTO|VALUES)\s*(?:[^\s(]+\s*)?\(")
        .unwrap()
});

pub struct SqlInjectionRule;

impl SqlInjectionRule {
    pub fn new() -> Self {
        Self
    }

    /// Whether raw literal text has the injection-prone shape
    pub fn matches(raw: &str) -> bool {
        SQL_PATTERN.is_match(raw)
    }
}

impl Default for SqlInjectionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for SqlInjectionRule {
    fn name(&self) -> &str {
        "SQL Injection"
    }

    fn is_enabled(&self, config: &GosentryConfig) -> bool {
        config.rules.sql_injection
    }

    fn check(&self, node: &Node, findings: &mut FindingSet) {
        let NodeKind::Call { args, .. } = &node.kind else {
            return;
        };

        for arg in args {
            let Some(lit) = arg.as_basic_lit() else {
                continue;
            };
            if lit.is_string() && Self::matches(&lit.raw) {
                findings.push_diagnostic(Diagnostic::new(
                    RuleKind::SqlInjection,
                    SQL_INJECTION_MESSAGE,
                    arg.span,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_shapes() {
        assert!(SqlInjectionRule::matches("\"SELECT * FROM users (\""));
        assert!(SqlInjectionRule::matches("\"SELECT * FROM (\""));
        assert!(SqlInjectionRule::matches("\"INSERT INTO users VALUES (%s)\""));
        assert!(SqlInjectionRule::matches("`DELETE x FROM t(`"));

        assert!(!SqlInjectionRule::matches("\"SELECT * FROM users\""));
        assert!(!SqlInjectionRule::matches("\"select * from users (\""));
        assert!(!SqlInjectionRule::matches("\"SELECT * FROM users WHERE id = (\""));
        assert!(!SqlInjectionRule::matches("\"hello (\""));
    }
}
