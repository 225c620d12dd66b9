//! Parser adapter: source text to [`SyntaxTree`]

pub mod go;

use crate::ast::{Span, SyntaxTree};
use std::fmt;
use thiserror::Error;

pub use go::GoParser;

/// One location where the grammar could not make sense of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSite {
    pub span: Span,
    pub message: String,
}

impl fmt::Display for ErrorSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.span.line, self.span.column, self.message)
    }
}

/// Every error site found in a file, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList(pub Vec<ErrorSite>);

impl ErrorList {
    pub fn first(&self) -> Option<&ErrorSite> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.len() {
            0 => write!(f, "syntax error"),
            1 => write!(f, "{}", self.0[0]),
            2 => write!(f, "{} (and 1 more error)", self.0[0]),
            n => write!(f, "{} (and {} more errors)", self.0[0], n - 1),
        }
    }
}

/// Error types for parsing operations
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Syntax(ErrorList),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    #[error("Failed to parse file: {0}")]
    ParseFailed(String),
}

impl ParseError {
    /// Position of the first syntax error, if this is a syntax error
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Syntax(list) => list.first().map(|site| site.span),
            _ => None,
        }
    }
}

/// Trait for language front-ends that lower source text into a [`SyntaxTree`]
pub trait LanguageParser: Send + Sync {
    /// Get the name of the language this parser handles
    fn language_name(&self) -> &str;

    /// Get file extensions this parser handles (e.g., [".go"])
    fn file_extensions(&self) -> &[&str];

    /// Parse source text into a syntax tree
    fn parse_source(&self, source: &str) -> Result<SyntaxTree, ParseError>;
}

/// Parse Go source text with the default parser
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    GoParser::new().parse_source(source)
}
