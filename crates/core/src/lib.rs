//! gosentry core - single-pass rule engine for Go sources
//!
//! This crate provides the analysis layer:
//! - Go parsing via Tree-sitter, lowered into a closed syntax tree
//! - A rule engine that walks the tree once and runs every rule at every node
//! - Naming, import listing, hardcoded credential and SQL injection rules
//! - File discovery and parallel batch scanning around the engine

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod discovery;
pub mod finding;
pub mod parser;
pub mod scan;
pub mod suppress;

pub use analyzer::{Rule, RuleEngine};
pub use ast::{Node, NodeKind, Span, SyntaxTree};
pub use config::GosentryConfig;
pub use discovery::discover_files;
pub use finding::{Diagnostic, Finding, FindingSet, RuleKind, ScanSummary, Severity};
pub use parser::{parse, LanguageParser, ParseError};
pub use scan::{collect_findings, scan_file, scan_files, summarize, FileReport};

/// gosentry version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
