//! Inline suppression comments: `gosentry-ignore PREFIX` silences findings at source

use crate::finding::{Diagnostic, FindingSet};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static SUPPRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gosentry-ignore\s+(.+)").unwrap());

/// Parse inline suppression comments from file content.
///
/// Returns a map of `line_number → vec_of_prefixes` (1-indexed). The token is
/// searched anywhere on the line, so both `//` and `/* */` comments work;
/// a closing `*/` ends the prefix list.
pub fn parse_suppressions(content: &str) -> HashMap<usize, Vec<String>> {
    let mut map = HashMap::new();
    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1; // 1-indexed
        if let Some(caps) = SUPPRESS_RE.captures(line) {
            let prefixes: Vec<String> = caps[1]
                .split_whitespace()
                .map_while(|token| {
                    let token = token.strip_suffix("*/").unwrap_or(token);
                    (!token.is_empty()).then(|| token.to_string())
                })
                .collect();
            if !prefixes.is_empty() {
                map.insert(line_no, prefixes);
            }
        }
    }
    map
}

/// Check whether a rule prefix is covered by any of the given suppression prefixes.
///
/// - `*` matches everything
/// - `CRED` matches findings from the credential rule
pub fn matches_suppression(rule_prefix: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| p == "*" || p == rule_prefix)
}

fn is_suppressed(diagnostic: &Diagnostic, sups: &HashMap<usize, Vec<String>>) -> bool {
    let line = diagnostic.span.line;
    let prefix = diagnostic.rule.prefix();

    let same_line = sups
        .get(&line)
        .map(|p| matches_suppression(prefix, p))
        .unwrap_or(false);
    let line_before = line > 1
        && sups
            .get(&(line - 1))
            .map(|p| matches_suppression(prefix, p))
            .unwrap_or(false);

    same_line || line_before
}

/// Drop diagnostics silenced by a comment on the same line or the line before.
///
/// Returns how many diagnostics were removed. Imports are untouched.
pub fn apply_inline_suppressions(findings: &mut FindingSet, content: &str) -> usize {
    let sups = parse_suppressions(content);
    if sups.is_empty() {
        return 0;
    }

    let before = findings.diagnostics.len();
    findings.diagnostics.retain(|d| !is_suppressed(d, &sups));
    before - findings.diagnostics.len()
}
