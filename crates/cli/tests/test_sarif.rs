use gosentry_cli::output::sarif::build_sarif_log;
use gosentry_core::{Finding, RuleKind};
use std::path::{Path, PathBuf};

fn make_finding(id: &str, rule: RuleKind, message: &str, file: &str, line: usize) -> Finding {
    Finding {
        id: id.to_string(),
        rule,
        severity: rule.severity(),
        message: message.to_string(),
        file: PathBuf::from(file),
        line,
        column: 5,
    }
}

#[test]
fn test_empty_findings() {
    let log = build_sarif_log(&[], Path::new("/repo"));
    assert_eq!(log.version, "2.1.0");
    assert_eq!(log.runs.len(), 1);
    assert!(log.runs[0].results.is_empty());
    assert!(log.runs[0].tool.driver.rules.is_empty());

    let json = serde_json::to_string_pretty(&log).unwrap();
    assert!(json.contains("\"version\": \"2.1.0\""));
    assert!(json.contains("\"$schema\""));
}

#[test]
fn test_single_finding_location() {
    let findings = vec![make_finding(
        "CRED-001",
        RuleKind::Credentials,
        "Potential hardcoded credential found: hunter2-password",
        "/repo/internal/db/conn.go",
        12,
    )];
    let log = build_sarif_log(&findings, Path::new("/repo"));

    let run = &log.runs[0];
    assert_eq!(run.tool.driver.name, "gosentry");
    assert_eq!(run.results.len(), 1);

    let result = &run.results[0];
    assert_eq!(result.rule_id, "CRED");
    assert_eq!(result.rule_index, 0);
    assert_eq!(result.level, "error");

    let loc = &result.locations[0].physical_location;
    assert_eq!(loc.artifact_location.uri, "internal/db/conn.go");
    assert_eq!(loc.region.start_line, 12);
    assert_eq!(loc.region.start_column, 5);
}

#[test]
fn test_one_rule_per_prefix() {
    let findings = vec![
        make_finding("SQL-001", RuleKind::SqlInjection, "m", "/repo/a.go", 1),
        make_finding("NAME-001", RuleKind::Naming, "m", "/repo/a.go", 2),
        make_finding("NAME-002", RuleKind::Naming, "m", "/repo/b.go", 3),
    ];
    let log = build_sarif_log(&findings, Path::new("/repo"));
    let run = &log.runs[0];

    let rule_ids: Vec<&str> = run.tool.driver.rules.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(rule_ids, vec!["NAME", "SQL"]);

    assert_eq!(run.results[0].rule_index, 1);
    assert_eq!(run.results[1].rule_index, 0);
    assert_eq!(run.results[2].rule_index, 0);
    assert_eq!(run.results[1].level, "warning");
}

#[test]
fn test_camel_case_keys() {
    let findings = vec![make_finding(
        "PARSE-001",
        RuleKind::Syntax,
        "Syntax error: 3:1: missing }",
        "/repo/main.go",
        3,
    )];
    let json = serde_json::to_string(&build_sarif_log(&findings, Path::new("/repo"))).unwrap();
    assert!(json.contains("\"ruleId\":\"PARSE\""));
    assert!(json.contains("\"startColumn\":5"));
    assert!(json.contains("\"semanticVersion\""));
    assert!(json.contains("\"artifactLocation\":{\"uri\":\"main.go\"}"));
}
