//! Rule engine: one traversal of a syntax tree, every rule at every node
//!
//! Rules are registered in a fixed order when the engine is built and are
//! invoked in that order at each visited node. A rule only ever sees the
//! node and the shared [`FindingSet`]; it cannot steer the traversal.

pub mod credentials;
pub mod imports;
pub mod naming;
pub mod sql_injection;

use crate::ast::{Node, Span, SyntaxTree};
use crate::config::GosentryConfig;
use crate::finding::{Diagnostic, FindingSet, RuleKind};
use crate::parser::{GoParser, LanguageParser};

/// A check invoked once per visited node
pub trait Rule: Send + Sync {
    /// Human-readable name of this rule
    fn name(&self) -> &str;

    /// Whether this rule is enabled given the current config
    fn is_enabled(&self, config: &GosentryConfig) -> bool;

    /// Inspect one node, appending zero or more findings
    fn check(&self, node: &Node, findings: &mut FindingSet);
}

/// Parses source text and runs the registered rules over the resulting tree
pub struct RuleEngine {
    parser: Box<dyn LanguageParser>,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Create an engine with all built-in rules in their default order
    pub fn new() -> Self {
        Self::with_rules(default_rules(&GosentryConfig::default()))
    }

    /// Create an engine with the built-in rules the config enables
    pub fn from_config(config: &GosentryConfig) -> Self {
        let rules = default_rules(config)
            .into_iter()
            .filter(|rule| {
                let enabled = rule.is_enabled(config);
                if !enabled {
                    log::debug!("rule '{}' disabled by config", rule.name());
                }
                enabled
            })
            .collect();
        Self::with_rules(rules)
    }

    /// Create an engine with an explicit, ordered rule list
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            parser: Box::new(GoParser::new()),
            rules,
        }
    }

    /// Names of the registered rules in invocation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// File extensions the engine's parser accepts (with leading dot)
    pub fn file_extensions(&self) -> &[&str] {
        self.parser.file_extensions()
    }

    /// Analyze one file's source text.
    ///
    /// A parse failure is not an error for the caller: it yields a finding
    /// set holding a single syntax diagnostic and no imports.
    pub fn analyze(&self, source: &str) -> FindingSet {
        match self.parser.parse_source(source) {
            Ok(tree) => self.analyze_tree(&tree),
            Err(e) => {
                let mut findings = FindingSet::new();
                findings.push_diagnostic(Diagnostic::new(
                    RuleKind::Syntax,
                    format!("Syntax error: {}", e),
                    e.span().unwrap_or(Span::new(1, 1)),
                ));
                findings
            }
        }
    }

    /// Run every rule over an already parsed tree
    pub fn analyze_tree(&self, tree: &SyntaxTree) -> FindingSet {
        let mut findings = FindingSet::new();
        let mut visited = 0;

        tree.root().walk(|node| {
            visited += 1;
            for rule in &self.rules {
                rule.check(node, &mut findings);
            }
        });

        findings.nodes_visited = visited;
        findings
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn default_rules(config: &GosentryConfig) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(naming::FunctionNamingRule::new()),
        Box::new(imports::ImportListingRule::new()),
        Box::new(credentials::HardcodedCredentialRule::with_keywords(
            config.credentials.keywords.clone(),
        )),
        Box::new(sql_injection::SqlInjectionRule::new()),
    ]
}
