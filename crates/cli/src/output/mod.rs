//! Output formatters for scan results

pub mod github;
pub mod json;
pub mod sarif;
pub mod terminal;

use gosentry_core::Finding;
use std::collections::HashMap;
use std::path::Path;

/// Path of `file` relative to the scan root, or unchanged if outside it
pub fn display_path(file: &Path, root: &Path) -> String {
    file.strip_prefix(root).unwrap_or(file).display().to_string()
}

/// Group findings by the file they were found in, keeping scan order
pub fn findings_by_file(findings: &[Finding]) -> HashMap<&Path, Vec<&Finding>> {
    let mut grouped: HashMap<&Path, Vec<&Finding>> = HashMap::new();
    for f in findings {
        grouped.entry(f.file.as_path()).or_default().push(f);
    }
    grouped
}
