//! Import listing rule: records every imported path, no diagnostics

use crate::analyzer::Rule;
use crate::ast::{Node, NodeKind};
use crate::config::GosentryConfig;
use crate::finding::FindingSet;

pub struct ImportListingRule;

impl ImportListingRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImportListingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ImportListingRule {
    fn name(&self) -> &str {
        "Import Listing"
    }

    fn is_enabled(&self, config: &GosentryConfig) -> bool {
        config.rules.imports
    }

    fn check(&self, node: &Node, findings: &mut FindingSet) {
        if let NodeKind::ImportDecl { specs } = &node.kind {
            for spec in specs {
                findings.push_import(spec.path.unquoted());
            }
        }
    }
}
