//! Integration tests for the four built-in rules, driven through the engine

use gosentry_core::analyzer::credentials::HardcodedCredentialRule;
use gosentry_core::analyzer::imports::ImportListingRule;
use gosentry_core::analyzer::naming::FunctionNamingRule;
use gosentry_core::analyzer::sql_injection::{SqlInjectionRule, SQL_INJECTION_MESSAGE};
use gosentry_core::analyzer::Rule;
use gosentry_core::ast::{BasicLit, Ident, ImportSpec, LitKind, Node, NodeKind, Span};
use gosentry_core::{FindingSet, RuleEngine, RuleKind, Severity};

fn analyze(source: &str) -> FindingSet {
    RuleEngine::new().analyze(source)
}

fn lit(kind: LitKind, raw: &str) -> Node {
    Node::new(NodeKind::BasicLit(BasicLit::new(kind, raw)), Span::new(1, 1))
}

// ── Function naming ─────────────────────────────────────────────

#[test]
fn test_uppercase_function_is_flagged() {
    let findings = analyze("func BadName() {}");
    assert_eq!(findings.diagnostics.len(), 1);
    let d = &findings.diagnostics[0];
    assert_eq!(d.rule, RuleKind::Naming);
    assert_eq!(d.severity, Severity::Warning);
    assert_eq!(d.message, "identifier 'BadName' should start with lowercase");
    assert_eq!(d.span, Span::new(1, 6));
}

#[test]
fn test_lowercase_function_is_clean() {
    let findings = analyze("func goodName() {}");
    assert!(findings.is_clean());
}

#[test]
fn test_uppercase_method_is_flagged() {
    let source = r#"
package main

type Server struct{}

func (s *Server) Handle() {}
func (s *Server) serve() {}
"#;
    let findings = analyze(source);
    assert_eq!(findings.count(RuleKind::Naming), 1);
    assert!(findings.diagnostics[0].message.contains("'Handle'"));
}

#[test]
fn test_underscore_prefix_passes() {
    let findings = analyze("package main\n\nfunc _helper() {}\n");
    assert!(findings.is_clean());
}

#[test]
fn test_empty_function_name_fails_closed() {
    let node = Node::new(
        NodeKind::FuncDecl {
            name: Ident::new("", Span::new(1, 1)),
            receiver: None,
            parts: vec![],
        },
        Span::new(1, 1),
    );
    let mut findings = FindingSet::new();
    FunctionNamingRule::new().check(&node, &mut findings);
    assert_eq!(findings.diagnostics.len(), 1);
}

#[test]
fn test_function_literals_are_not_declarations() {
    let source = r#"
package main

func main() {
    Handler := func() {}
    Handler()
}
"#;
    let findings = analyze(source);
    assert_eq!(findings.count(RuleKind::Naming), 0);
}

// ── Import listing ──────────────────────────────────────────────

#[test]
fn test_imports_listed_in_declaration_order() {
    let source = r#"
package main

import "fmt"
import "os"
import "net/http"
"#;
    let findings = analyze(source);
    assert_eq!(findings.imports, vec!["fmt", "os", "net/http"]);
    assert!(findings.is_clean());
}

#[test]
fn test_grouped_imports_keep_order() {
    let source = r#"
package main

import (
    "fmt"
    "database/sql"
    sq "github.com/Masterminds/squirrel"
)
"#;
    let findings = analyze(source);
    assert_eq!(
        findings.imports,
        vec!["fmt", "database/sql", "github.com/Masterminds/squirrel"]
    );
}

#[test]
fn test_duplicate_imports_are_kept() {
    let source = "package main\n\nimport \"fmt\"\nimport \"fmt\"\n";
    let findings = analyze(source);
    assert_eq!(findings.imports, vec!["fmt", "fmt"]);
}

#[test]
fn test_raw_string_import_is_unquoted() {
    let findings = analyze("package main\n\nimport `strings`\n");
    assert_eq!(findings.imports, vec!["strings"]);
}

#[test]
fn test_import_rule_directly() {
    let node = Node::new(
        NodeKind::ImportDecl {
            specs: vec![ImportSpec {
                alias: None,
                path: BasicLit::new(LitKind::String, "\"fmt\""),
                span: Span::new(1, 8),
            }],
        },
        Span::new(1, 1),
    );
    let mut findings = FindingSet::new();
    ImportListingRule::new().check(&node, &mut findings);
    assert_eq!(findings.imports, vec!["fmt"]);
    assert!(findings.diagnostics.is_empty());
}

// ── Hardcoded credentials ───────────────────────────────────────

#[test]
fn test_var_with_secret_literal() {
    let findings = analyze("var secret = \"secretValue\"");
    assert_eq!(findings.diagnostics.len(), 1);
    let d = &findings.diagnostics[0];
    assert_eq!(d.rule, RuleKind::Credentials);
    assert_eq!(d.message, "Potential hardcoded credential found: secretValue");
    assert_eq!(d.span, Span::new(1, 14));
    assert!(findings.imports.is_empty());
}

#[test]
fn test_assignment_with_password_literal() {
    let source = r#"
package main

func main() {
    pw := "my-password-123"
    pw = "another password"
}
"#;
    let findings = analyze(source);
    assert_eq!(findings.count(RuleKind::Credentials), 2);
    assert_eq!(
        findings.diagnostics[0].message,
        "Potential hardcoded credential found: my-password-123"
    );
}

#[test]
fn test_one_finding_per_literal() {
    let source = r#"
package main

var a, b, c = "password", "nothing", "secret"
"#;
    let findings = analyze(source);
    assert_eq!(findings.count(RuleKind::Credentials), 2);
}

#[test]
fn test_credential_match_is_case_sensitive() {
    let source = r#"
package main

var a = "Password"
var b = "SECRET"
"#;
    let findings = analyze(source);
    assert!(findings.is_clean());
}

#[test]
fn test_const_and_raw_literals_are_checked() {
    let source = r#"
package main

const dsn = `user:password@tcp(db)`
"#;
    let findings = analyze(source);
    assert_eq!(findings.count(RuleKind::Credentials), 1);
    assert!(findings.diagnostics[0]
        .message
        .ends_with("user:password@tcp(db)"));
}

#[test]
fn test_declaration_without_initializer_is_skipped() {
    let findings = analyze("package main\n\nvar password string\n");
    assert!(findings.is_clean());
}

#[test]
fn test_non_literal_rhs_is_ignored() {
    let source = r#"
package main

func main() {
    db := sql.Open("mysql", "user:password@tcp(localhost:3306)/dbname")
    key := os.Getenv("secret")
}
"#;
    let findings = analyze(source);
    assert_eq!(findings.count(RuleKind::Credentials), 0);
}

#[test]
fn test_custom_keywords() {
    let rule = HardcodedCredentialRule::with_keywords(vec!["token".to_string()]);
    let node = Node::new(
        NodeKind::Assign {
            lhs: vec![],
            operator: "=".to_string(),
            rhs: vec![lit(LitKind::String, "\"api-token\""), lit(LitKind::String, "\"secret\"")],
        },
        Span::new(1, 1),
    );
    let mut findings = FindingSet::new();
    rule.check(&node, &mut findings);
    assert_eq!(findings.messages(), vec!["Potential hardcoded credential found: api-token"]);
}

#[test]
fn test_non_string_literal_is_ignored() {
    let node = Node::new(
        NodeKind::Assign {
            lhs: vec![],
            operator: "=".to_string(),
            rhs: vec![lit(LitKind::Rune, "'s'"), lit(LitKind::Int, "42")],
        },
        Span::new(1, 1),
    );
    let mut findings = FindingSet::new();
    HardcodedCredentialRule::new().check(&node, &mut findings);
    assert!(findings.is_clean());
}

// ── SQL injection ───────────────────────────────────────────────

#[test]
fn test_sql_literal_argument_is_flagged() {
    let source = r#"
package main

func main() {
    db.Query("SELECT * FROM users (")
}
"#;
    let findings = analyze(source);
    assert_eq!(findings.diagnostics.len(), 1);
    let d = &findings.diagnostics[0];
    assert_eq!(d.rule, RuleKind::SqlInjection);
    assert_eq!(d.message, SQL_INJECTION_MESSAGE);
    assert!(!d.message.contains("users"));
}

#[test]
fn test_one_sql_finding_per_matching_argument() {
    let source = r#"
package main

func main() {
    run("INSERT INTO t VALUES (%s)", "DELETE a FROM b (", "SELECT 1")
}
"#;
    let findings = analyze(source);
    assert_eq!(findings.count(RuleKind::SqlInjection), 2);
}

#[test]
fn test_sql_without_parenthesis_is_clean() {
    let source = r#"
package main

func main() {
    db.Query("SELECT * FROM users WHERE id = ?", id)
}
"#;
    let findings = analyze(source);
    assert!(findings.is_clean());
}

#[test]
fn test_sql_keywords_are_case_sensitive() {
    let source = r#"
package main

func main() {
    db.Query("select * from users (")
}
"#;
    assert!(analyze(source).is_clean());
}

#[test]
fn test_sql_outside_call_is_ignored() {
    let source = r#"
package main

var q = "SELECT * FROM users ("
"#;
    assert!(analyze(source).is_clean());
}

#[test]
fn test_sql_concatenation_is_not_detected() {
    let source = r#"
package main

func main() {
    db.Query("SELECT * FROM " + table + " (")
}
"#;
    assert!(analyze(source).is_clean());
}

#[test]
fn test_sql_rule_directly() {
    let node = Node::new(
        NodeKind::Call {
            callee: Box::new(Node::new(NodeKind::Ident("exec".to_string()), Span::new(1, 1))),
            args: vec![lit(LitKind::String, "\"UPDATE t SET a = 1 FROM (\"")],
        },
        Span::new(1, 1),
    );
    let mut findings = FindingSet::new();
    SqlInjectionRule::new().check(&node, &mut findings);
    assert_eq!(findings.messages(), vec![SQL_INJECTION_MESSAGE]);
}

#[test]
fn test_rule_kind_prefix_lookup() {
    for kind in [
        RuleKind::Syntax,
        RuleKind::Naming,
        RuleKind::Credentials,
        RuleKind::SqlInjection,
    ] {
        assert_eq!(RuleKind::from_prefix(kind.prefix()), Some(kind));
    }
    assert_eq!(RuleKind::from_prefix("SEC"), None);
}
