//! Scan command: discover Go files, analyze them in parallel, report

use anyhow::{Context, Result};
use colored::Colorize;
use gosentry_core::{
    collect_findings, discover_files, scan_files, summarize, FileReport, Finding, GosentryConfig,
    RuleEngine, ScanSummary,
};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::output;
use crate::progress::Step;
use crate::OutputFormat;

pub fn run(path: Option<&Path>, cli: &crate::Cli) -> Result<ScanSummary> {
    let start = Instant::now();
    let root: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().context("error getting current directory")?,
    };
    let root = std::fs::canonicalize(&root)
        .with_context(|| format!("cannot access directory {}", root.display()))?;

    // ── 1. Config ────────────────────────────────────────────────
    let config = GosentryConfig::find_and_load(&root)?;
    let format = resolve_format(cli, &config);
    if !config.output.color {
        colored::control::set_override(false);
    }
    let show_imports = config.output.show_imports && !cli.no_imports;
    log::debug!("scanning {} with {:?} output", root.display(), format);

    if format == OutputFormat::Terminal {
        println!(
            "{}",
            format!("  gosentry v{} — scanning {}", gosentry_core::VERSION, root.display()).bold()
        );
        println!();
    }

    // ── 2. Discovery ─────────────────────────────────────────────
    let engine = RuleEngine::from_config(&config);

    let step = Step::new("Discovering Go files");
    let files = discover_files(
        &root,
        engine.file_extensions(),
        &config.ignore.paths,
        &config.ignore.files,
    )?;
    step.finish(&format!("{} files", files.len()));

    // ── 3. Analysis ──────────────────────────────────────────────
    let step = Step::new("Analyzing");
    let reports = scan_files(&engine, &files);
    for report in &reports {
        if let Some(ref err) = report.read_error {
            step.warn(err);
        }
    }
    let findings = collect_findings(&reports, &config);
    let summary = summarize(&reports, &findings);
    step.finish(&format!(
        "{} nodes, {} finding(s)",
        summary.nodes_visited,
        findings.len()
    ));

    // ── 4. Output ────────────────────────────────────────────────
    match format {
        OutputFormat::Terminal => {
            print_terminal(&reports, &findings, &summary, show_imports, start)
        }
        OutputFormat::Json => print_json(&reports, &findings, &summary, &root)?,
        OutputFormat::Sarif => print_sarif(&findings, &root)?,
        OutputFormat::Github => {
            for f in &findings {
                println!("{}", output::github::format_finding(f, &root));
            }
        }
    }

    Ok(summary)
}

// ── Helpers ──────────────────────────────────────────────────────

pub fn resolve_format(cli: &crate::Cli, config: &GosentryConfig) -> OutputFormat {
    if let Some(f) = cli.format {
        return f;
    }
    match config.output.format.as_str() {
        "json" => OutputFormat::Json,
        "sarif" => OutputFormat::Sarif,
        "github" => OutputFormat::Github,
        _ => OutputFormat::Terminal,
    }
}

fn print_terminal(
    reports: &[FileReport],
    findings: &[Finding],
    summary: &ScanSummary,
    show_imports: bool,
    start: Instant,
) {
    use output::terminal;

    println!();
    if reports.is_empty() {
        println!("  {}", "No Go files found.".dimmed());
    }

    let grouped = output::findings_by_file(findings);
    for report in reports {
        let name = report.display_name();
        println!("{}", terminal::format_file_header(&name).bold());

        if let Some(ref err) = report.read_error {
            println!("  {}", err.red());
            println!();
            continue;
        }

        match grouped.get(report.path.as_path()) {
            Some(file_findings) if !file_findings.is_empty() => {
                for f in file_findings {
                    println!("{}", terminal::format_finding(f));
                }
            }
            _ => println!("{}", terminal::format_no_issues(&name).green()),
        }

        if show_imports {
            for line in terminal::format_imports(&name, &report.findings.imports) {
                println!("{}", line);
            }
        }
        println!();
    }

    println!("  {}", "\u{2500}".repeat(60).dimmed());
    println!(
        "  {} \u{00b7} {} \u{00b7} {}",
        format!("{} error(s)", summary.errors).red(),
        format!("{} warning(s)", summary.warnings).yellow(),
        format!("{} info", summary.info).blue()
    );
    println!(
        "  {} files analyzed \u{00b7} {} nodes visited",
        summary.files_analyzed, summary.nodes_visited
    );
    if summary.suppressed > 0 {
        println!(
            "  {}",
            format!("{} suppressed inline", summary.suppressed).dimmed()
        );
    }
    println!("  Time: {:.1}s", start.elapsed().as_secs_f64());
}

fn print_json(
    reports: &[FileReport],
    findings: &[Finding],
    summary: &ScanSummary,
    root: &Path,
) -> Result<()> {
    let out = output::json::build_json_output(reports, findings, summary, root);
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_sarif(findings: &[Finding], root: &Path) -> Result<()> {
    let log = output::sarif::build_sarif_log(findings, root);
    println!("{}", serde_json::to_string_pretty(&log)?);
    Ok(())
}
