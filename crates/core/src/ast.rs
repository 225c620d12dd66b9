//! Syntax tree consumed by the rule engine
//!
//! The tree is a closed set of node kinds lowered from the tree-sitter CST.
//! Kinds that a rule inspects get their own variant with named fields; every
//! other grammar production is kept as [`NodeKind::Other`] so traversal still
//! reaches everything below it.

use serde::{Deserialize, Serialize};

/// 1-based source position of a node's first byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Lexical class of a basic literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LitKind {
    /// `"..."`
    String,
    /// `` `...` ``
    RawString,
    Int,
    Float,
    Imaginary,
    Rune,
}

/// A literal token with its raw source text (delimiters and escapes intact)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicLit {
    pub kind: LitKind,
    pub raw: String,
}

impl BasicLit {
    pub fn new(kind: LitKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self.kind, LitKind::String | LitKind::RawString)
    }

    /// Literal text with its quote delimiters stripped.
    ///
    /// Escape sequences are left as written.
    pub fn unquoted(&self) -> &str {
        match self.kind {
            LitKind::String => self.raw.trim_matches('"'),
            LitKind::RawString => self.raw.trim_matches('`'),
            LitKind::Rune => self.raw.trim_matches('\''),
            _ => &self.raw,
        }
    }
}

/// An identifier with its position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// One path entry of an import declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Local package name (`alias`, `.` or `_`), if given
    pub alias: Option<String>,
    pub path: BasicLit,
    pub span: Span,
}

/// Which keyword introduced a value spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKeyword {
    Var,
    Const,
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root of one source file
    File { items: Vec<Node> },

    /// Function or method declaration
    FuncDecl {
        name: Ident,
        /// Receiver parameter list for methods
        receiver: Option<Box<Node>>,
        /// Type parameters, parameters, result and body in source order
        parts: Vec<Node>,
    },

    /// `import "x"` or `import ( ... )`
    ImportDecl { specs: Vec<ImportSpec> },

    /// `=`, `op=` and `:=` statements
    Assign {
        lhs: Vec<Node>,
        operator: String,
        rhs: Vec<Node>,
    },

    /// One `var` or `const` spec
    ValueSpec {
        keyword: ValueKeyword,
        names: Vec<Ident>,
        ty: Option<Box<Node>>,
        values: Vec<Node>,
    },

    /// `callee(args...)`
    Call { callee: Box<Node>, args: Vec<Node> },

    BasicLit(BasicLit),

    Ident(String),

    /// Any other grammar production, identified by its tree-sitter kind
    Other { kind: String, children: Vec<Node> },
}

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::File { items } => items.iter().collect(),
            NodeKind::FuncDecl {
                receiver, parts, ..
            } => receiver.iter().map(|r| &**r).chain(parts.iter()).collect(),
            NodeKind::ImportDecl { .. } => Vec::new(),
            NodeKind::Assign { lhs, rhs, .. } => lhs.iter().chain(rhs.iter()).collect(),
            NodeKind::ValueSpec { ty, values, .. } => {
                ty.iter().map(|t| &**t).chain(values.iter()).collect()
            }
            NodeKind::Call { callee, args } => std::iter::once(&**callee).chain(args.iter()).collect(),
            NodeKind::BasicLit(_) | NodeKind::Ident(_) => Vec::new(),
            NodeKind::Other { children, .. } => children.iter().collect(),
        }
    }

    /// The literal payload, if this node is a basic literal
    pub fn as_basic_lit(&self) -> Option<&BasicLit> {
        match &self.kind {
            NodeKind::BasicLit(lit) => Some(lit),
            _ => None,
        }
    }

    /// Visit this node and every descendant in depth-first pre-order.
    ///
    /// Uses an explicit stack, like lowering and dropping the tree, so deeply
    /// nested input cannot exhaust the call stack.
    pub fn walk<F: FnMut(&Node)>(&self, mut visit: F) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visit(node);
            let children = node.children();
            stack.extend(children.into_iter().rev());
        }
    }
}

impl Node {
    /// Move every direct child out, leaving this node childless
    fn take_children(&mut self) -> Vec<Node> {
        match &mut self.kind {
            NodeKind::File { items } => std::mem::take(items),
            NodeKind::FuncDecl {
                receiver, parts, ..
            } => {
                let mut taken: Vec<Node> = receiver.take().map(|r| *r).into_iter().collect();
                taken.append(parts);
                taken
            }
            NodeKind::Assign { lhs, rhs, .. } => {
                let mut taken = std::mem::take(lhs);
                taken.append(rhs);
                taken
            }
            NodeKind::ValueSpec { ty, values, .. } => {
                let mut taken: Vec<Node> = ty.take().map(|t| *t).into_iter().collect();
                taken.append(values);
                taken
            }
            NodeKind::Call { callee, args } => {
                let empty = Node::new(
                    NodeKind::Other {
                        kind: String::new(),
                        children: Vec::new(),
                    },
                    Span::default(),
                );
                let mut taken = vec![std::mem::replace(&mut **callee, empty)];
                taken.append(args);
                taken
            }
            NodeKind::ImportDecl { .. } | NodeKind::BasicLit(_) | NodeKind::Ident(_) => Vec::new(),
            NodeKind::Other { children, .. } => std::mem::take(children),
        }
    }
}

// Dropping a deep tree recursively would overflow the stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = self.take_children();
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.take_children());
        }
    }
}

/// Parsed form of one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTree {
    root: Node,
}

impl SyntaxTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.walk(|_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> Node {
        Node::new(NodeKind::Ident(name.to_string()), Span::new(1, 1))
    }

    fn names_in_order(root: &Node) -> Vec<String> {
        let mut names = Vec::new();
        root.walk(|n| match &n.kind {
            NodeKind::Ident(name) => names.push(name.clone()),
            NodeKind::Other { kind, .. } => names.push(kind.clone()),
            _ => {}
        });
        names
    }

    #[test]
    fn test_walk_is_preorder_left_to_right() {
        let inner = Node::new(
            NodeKind::Other {
                kind: "inner".to_string(),
                children: vec![leaf("b"), leaf("c")],
            },
            Span::new(1, 1),
        );
        let root = Node::new(
            NodeKind::Other {
                kind: "root".to_string(),
                children: vec![leaf("a"), inner, leaf("d")],
            },
            Span::new(1, 1),
        );

        assert_eq!(names_in_order(&root), vec!["root", "a", "inner", "b", "c", "d"]);
    }

    #[test]
    fn test_unquoted_literals() {
        assert_eq!(BasicLit::new(LitKind::String, "\"fmt\"").unquoted(), "fmt");
        assert_eq!(BasicLit::new(LitKind::RawString, "`a\\b`").unquoted(), "a\\b");
        assert_eq!(BasicLit::new(LitKind::Int, "42").unquoted(), "42");
    }

    #[test]
    fn test_node_count() {
        let root = Node::new(
            NodeKind::File {
                items: vec![leaf("x"), leaf("y")],
            },
            Span::new(1, 1),
        );
        assert_eq!(SyntaxTree::new(root).node_count(), 3);
    }
}
