//! File discovery with gitignore-aware filtering
//!
//! Uses the `ignore` crate (from ripgrep) to automatically respect
//! `.gitignore`, `.ignore`, and `.git/info/exclude` files.

use anyhow::Result;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discover files under `root` matching any of the given `extensions`,
/// respecting `.gitignore`, skipping paths that match `ignore_patterns` and
/// files whose name matches one of the `exclude_files` globs
/// (e.g. `*_test.go`).
///
/// Returns absolute paths sorted alphabetically.
pub fn discover_files(
    root: &Path,
    extensions: &[&str],
    ignore_patterns: &[String],
    exclude_files: &[String],
) -> Result<Vec<PathBuf>> {
    let root = root.canonicalize()?;

    let mut builder = WalkBuilder::new(&root);
    builder
        .hidden(true) // skip hidden files/dirs
        .git_ignore(true) // respect .gitignore
        .git_global(true) // respect global gitignore
        .git_exclude(true); // respect .git/info/exclude

    // Config ignore patterns become negated overrides so they act as excludes.
    if !ignore_patterns.is_empty() {
        let mut overrides = OverrideBuilder::new(&root);
        for pattern in ignore_patterns {
            // Convert directory patterns like "vendor/" to glob "!vendor/**"
            let glob = if pattern.ends_with('/') {
                format!("!{}**", pattern)
            } else {
                format!("!{}", pattern)
            };
            overrides.add(&glob)?;
        }
        builder.overrides(overrides.build()?);
    }

    let excluded: Vec<glob::Pattern> = exclude_files
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                log::warn!("ignoring invalid file pattern '{}': {}", p, e);
                None
            }
        })
        .collect();

    let mut files = Vec::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        // Only collect files, not directories
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.into_path();
        if !has_supported_extension(&path, extensions) || is_excluded(&path, &excluded) {
            continue;
        }

        if path.is_absolute() {
            files.push(path);
        } else {
            files.push(root.join(path));
        }
    }

    files.sort();
    Ok(files)
}

fn has_supported_extension(path: &Path, extensions: &[&str]) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(e) => e,
        None => return false,
    };
    let with_dot = format!(".{}", ext);
    extensions.contains(&with_dot.as_str())
}

fn is_excluded(path: &Path, excluded: &[glob::Pattern]) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => excluded.iter().any(|p| p.matches(name)),
        None => false,
    }
}
