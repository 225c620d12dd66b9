//! Go language parser using Tree-sitter
//!
//! Tree-sitter recovers from malformed input by inserting ERROR and MISSING
//! nodes. Any such node makes the whole file a syntax error; otherwise the
//! concrete tree is lowered into the engine's [`SyntaxTree`].

use super::{ErrorList, ErrorSite, LanguageParser, ParseError};
use crate::ast::{BasicLit, Ident, ImportSpec, LitKind, Node, NodeKind, Span, SyntaxTree, ValueKeyword};
use std::borrow::Cow;
use tree_sitter::{Parser, Tree};

/// Longest excerpt of unexpected input quoted in an error message
const MAX_EXCERPT: usize = 24;

/// Go language parser
pub struct GoParser {
    language: tree_sitter::Language,
}

impl Default for GoParser {
    fn default() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl GoParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::TreeSitter(e.to_string()))?;
        Ok(parser)
    }

    fn parse_tree(&self, source: &str) -> Result<Tree, ParseError> {
        let mut parser = self.create_parser()?;
        parser
            .parse(source, None)
            .ok_or_else(|| ParseError::ParseFailed("Failed to parse Go source".to_string()))
    }

    // ── Error collection ─────────────────────────────────────────

    fn collect_errors(&self, root: tree_sitter::Node, source: &str) -> Vec<ErrorSite> {
        let mut sites = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if node.is_missing() {
                sites.push(ErrorSite {
                    span: span_of(&node),
                    message: format!("missing {:?}", node.kind()),
                });
                continue;
            }
            if node.is_error() {
                sites.push(ErrorSite {
                    span: span_of(&node),
                    message: unexpected(text_of(&node, source)),
                });
                continue;
            }
            if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<_> = node.children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }

        sites.sort_by_key(|site| (site.span.line, site.span.column));
        sites
    }

    // ── Lowering ─────────────────────────────────────────────────

    /// Lower the concrete tree bottom-up with an explicit work stack.
    ///
    /// Nesting depth of the input is bounded only by memory, never by the
    /// call stack.
    fn lower(&self, root: tree_sitter::Node, source: &str) -> Node {
        let mut stack = vec![self.open(root, source)];

        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.pending.pop() {
                let opened = self.open(child, source);
                stack.push(opened);
                continue;
            }

            let node = match stack.pop() {
                Some(frame) => frame.finish(),
                None => break,
            };
            match stack.last_mut() {
                Some(parent) => parent.done.push(node),
                None => return node,
            }
        }

        Node::new(NodeKind::File { items: Vec::new() }, span_of(&root))
    }

    /// Decide what `node` lowers to and which children must be lowered first
    fn open<'t>(&self, node: tree_sitter::Node<'t>, source: &str) -> Frame<'t> {
        let (shape, children) = match node.kind() {
            "source_file" => (Shape::File, named_children(node)),
            "function_declaration" | "method_declaration" => {
                let name_node = node.child_by_field_name("name");
                let receiver = node.child_by_field_name("receiver");
                let name = match name_node {
                    Some(n) => Ident::new(text_of(&n, source), span_of(&n)),
                    None => Ident::new("", span_of(&node)),
                };
                let skip: Vec<usize> = name_node
                    .iter()
                    .chain(receiver.iter())
                    .map(|n| n.id())
                    .collect();

                let mut children: Vec<_> = receiver.into_iter().collect();
                children.extend(
                    named_children(node)
                        .into_iter()
                        .filter(|c| !skip.contains(&c.id())),
                );
                let has_receiver = receiver.is_some();
                (Shape::Func { name, has_receiver }, children)
            }
            "import_declaration" => (
                Shape::Leaf(NodeKind::ImportDecl {
                    specs: self.import_specs(node, source),
                }),
                Vec::new(),
            ),
            "assignment_statement" | "short_var_declaration" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| text_of(&op, source).to_string())
                    .unwrap_or_else(|| ":=".to_string());
                let mut children = flatten_list(node.child_by_field_name("left"));
                let lhs_len = children.len();
                children.extend(flatten_list(node.child_by_field_name("right")));
                (Shape::Assign { operator, lhs_len }, children)
            }
            "var_spec" | "const_spec" => {
                let keyword = if node.kind() == "var_spec" {
                    ValueKeyword::Var
                } else {
                    ValueKeyword::Const
                };
                let mut cursor = node.walk();
                let names = node
                    .children_by_field_name("name", &mut cursor)
                    .filter(|n| n.kind() == "identifier")
                    .map(|n| Ident::new(text_of(&n, source), span_of(&n)))
                    .collect();

                let ty = node.child_by_field_name("type");
                let mut children: Vec<_> = ty.into_iter().collect();
                children.extend(flatten_list(node.child_by_field_name("value")));
                let has_ty = ty.is_some();
                (Shape::ValueSpec { keyword, names, has_ty }, children)
            }
            "call_expression" => match node.child_by_field_name("function") {
                Some(callee) => {
                    let mut children = vec![callee];
                    if let Some(args) = node.child_by_field_name("arguments") {
                        children.extend(named_children(args));
                    }
                    (Shape::Call, children)
                }
                None => (Shape::Other(node.kind().to_string()), named_children(node)),
            },
            "identifier" | "field_identifier" | "type_identifier" | "package_identifier"
            | "blank_identifier" => (
                Shape::Leaf(NodeKind::Ident(text_of(&node, source).to_string())),
                Vec::new(),
            ),
            kind => match literal_kind(kind) {
                Some(lit_kind) => (
                    Shape::Leaf(NodeKind::BasicLit(BasicLit::new(
                        lit_kind,
                        text_of(&node, source),
                    ))),
                    Vec::new(),
                ),
                None => (Shape::Other(kind.to_string()), named_children(node)),
            },
        };

        let mut pending = children;
        pending.reverse();
        Frame {
            shape,
            span: span_of(&node),
            done: Vec::with_capacity(pending.len()),
            pending,
        }
    }

    /// Import specs of a declaration, whether written singly or as a list
    fn import_specs(&self, node: tree_sitter::Node, source: &str) -> Vec<ImportSpec> {
        let mut specs = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => specs.extend(self.import_spec(child, source)),
                "import_spec_list" => {
                    let mut list_cursor = child.walk();
                    for spec in child.named_children(&mut list_cursor) {
                        if spec.kind() == "import_spec" {
                            specs.extend(self.import_spec(spec, source));
                        }
                    }
                }
                _ => {}
            }
        }
        specs
    }

    fn import_spec(&self, node: tree_sitter::Node, source: &str) -> Option<ImportSpec> {
        let path_node = node.child_by_field_name("path")?;
        let kind = literal_kind(path_node.kind())?;

        let alias = node
            .child_by_field_name("name")
            .map(|n| text_of(&n, source).to_string());

        Some(ImportSpec {
            alias,
            path: BasicLit::new(kind, text_of(&path_node, source)),
            span: span_of(&node),
        })
    }
}

impl LanguageParser for GoParser {
    fn language_name(&self) -> &str {
        "go"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".go"]
    }

    fn parse_source(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        // A grouped declaration closing the file without a newline leaves
        // tree-sitter expecting a terminator at EOF. Padding never moves a span.
        let source: Cow<str> = if source.ends_with('\n') {
            Cow::Borrowed(source)
        } else {
            Cow::Owned(format!("{}\n", source))
        };

        let tree = self.parse_tree(&source)?;
        let root = tree.root_node();

        if root.has_error() {
            let mut sites = self.collect_errors(root, &source);
            if sites.is_empty() {
                let end = root.end_position();
                sites.push(ErrorSite {
                    span: Span::new(end.row + 1, end.column + 1),
                    message: "syntax error".to_string(),
                });
            }
            log::debug!("go parse failed with {} error site(s)", sites.len());
            return Err(ParseError::Syntax(ErrorList(sites)));
        }

        Ok(SyntaxTree::new(self.lower(root, &source)))
    }
}

// ── Helpers ──────────────────────────────────────────────────────

/// What a concrete node lowers to once its children are lowered
enum Shape {
    File,
    Func { name: Ident, has_receiver: bool },
    Assign { operator: String, lhs_len: usize },
    ValueSpec {
        keyword: ValueKeyword,
        names: Vec<Ident>,
        has_ty: bool,
    },
    Call,
    Leaf(NodeKind),
    Other(String),
}

/// One node on the lowering stack
struct Frame<'t> {
    shape: Shape,
    span: Span,
    /// Children still to lower, last child first
    pending: Vec<tree_sitter::Node<'t>>,
    /// Lowered children in source order
    done: Vec<Node>,
}

impl Frame<'_> {
    fn finish(self) -> Node {
        let Frame {
            shape, span, done, ..
        } = self;
        let mut done = done.into_iter();

        let kind = match shape {
            Shape::File => NodeKind::File {
                items: done.collect(),
            },
            Shape::Func { name, has_receiver } => {
                let receiver = if has_receiver {
                    done.next().map(Box::new)
                } else {
                    None
                };
                NodeKind::FuncDecl {
                    name,
                    receiver,
                    parts: done.collect(),
                }
            }
            Shape::Assign { operator, lhs_len } => {
                let mut lhs: Vec<Node> = done.collect();
                let rhs = lhs.split_off(lhs_len.min(lhs.len()));
                NodeKind::Assign { lhs, operator, rhs }
            }
            Shape::ValueSpec {
                keyword,
                names,
                has_ty,
            } => {
                let ty = if has_ty {
                    done.next().map(Box::new)
                } else {
                    None
                };
                NodeKind::ValueSpec {
                    keyword,
                    names,
                    ty,
                    values: done.collect(),
                }
            }
            Shape::Call => match done.next() {
                Some(callee) => NodeKind::Call {
                    callee: Box::new(callee),
                    args: done.collect(),
                },
                None => NodeKind::Other {
                    kind: "call_expression".to_string(),
                    children: Vec::new(),
                },
            },
            Shape::Leaf(kind) => kind,
            Shape::Other(kind) => NodeKind::Other {
                kind,
                children: done.collect(),
            },
        };
        Node::new(kind, span)
    }
}

/// Named, non-comment children in source order
fn named_children(node: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect();
    children
}

/// Flatten an `expression_list` field into its expressions
fn flatten_list(node: Option<tree_sitter::Node<'_>>) -> Vec<tree_sitter::Node<'_>> {
    match node {
        Some(list) if list.kind() == "expression_list" => named_children(list),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}

fn span_of(node: &tree_sitter::Node) -> Span {
    let pos = node.start_position();
    Span::new(pos.row + 1, pos.column + 1)
}

fn text_of<'s>(node: &tree_sitter::Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn literal_kind(kind: &str) -> Option<LitKind> {
    match kind {
        "interpreted_string_literal" => Some(LitKind::String),
        "raw_string_literal" => Some(LitKind::RawString),
        "int_literal" => Some(LitKind::Int),
        "float_literal" => Some(LitKind::Float),
        "imaginary_literal" => Some(LitKind::Imaginary),
        "rune_literal" => Some(LitKind::Rune),
        _ => None,
    }
}

fn unexpected(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return "syntax error".to_string();
    }
    let excerpt: String = first_line.chars().take(MAX_EXCERPT).collect();
    format!("unexpected `{}`", excerpt)
}
